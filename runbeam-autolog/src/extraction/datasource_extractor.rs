//! Injectable strategy seam for datasource-event derivation.

use crate::engine::QueryExecution;
use crate::event::DatasourceEvent;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure while deriving datasource events from a completed execution.
///
/// Never escapes the listener: the execution is logged and dropped with zero
/// events published.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtractionError {
    message: String,
}

impl ExtractionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ExtractionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "datasource extraction failed: {}", self.message)
    }
}

impl Error for ExtractionError {}

/// Derives zero or more [`DatasourceEvent`]s from one completed execution.
///
/// Implementations must be pure with respect to the execution: the broadcast
/// path calls `extract` exactly once per completed execution and publishes the
/// returned events in order.
pub trait DatasourceExtractor: Send + Sync {
    fn extract(&self, execution: &QueryExecution)
        -> Result<Vec<DatasourceEvent>, ExtractionError>;
}
