//! Execution-completed listener adapter that feeds extracted events to fan-out.

use crate::data_plane::event_broadcaster::EventBroadcaster;
use crate::engine::{ExecutionListener, QueryExecution};
use crate::extraction::datasource_extractor::DatasourceExtractor;
use crate::observability::{events, fields};
use async_trait::async_trait;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const COMPONENT: &str = "execution_listener";

/// Adapts engine completion callbacks into datasource-event broadcasts.
///
/// Extraction runs behind a panic shield and an error check; any failure is
/// logged and the execution dropped with zero events published, so nothing on
/// this path can fail or slow the originating query.
pub(crate) struct DatasourceEventListener {
    listener_id: String,
    extractor: Arc<dyn DatasourceExtractor>,
    broadcaster: EventBroadcaster,
}

impl DatasourceEventListener {
    pub(crate) fn new(
        extractor: Arc<dyn DatasourceExtractor>,
        broadcaster: EventBroadcaster,
    ) -> Self {
        Self {
            listener_id: Uuid::new_v4().to_string(),
            extractor,
            broadcaster,
        }
    }

    /// Returns the correlation id carried in this listener's log events.
    pub(crate) fn listener_id(&self) -> &str {
        &self.listener_id
    }
}

#[async_trait]
impl ExecutionListener for DatasourceEventListener {
    async fn on_execution_end(&self, execution: QueryExecution) {
        let listener_id = self.listener_id.as_str();
        let execution_id = execution.execution_id;

        debug!(
            event = events::EXECUTION_RECEIVED,
            component = COMPONENT,
            listener_id,
            execution_id,
            "received completed execution"
        );

        let extracted =
            std::panic::catch_unwind(AssertUnwindSafe(|| self.extractor.extract(&execution)));

        let datasource_events = match extracted {
            Ok(Ok(datasource_events)) => datasource_events,
            Ok(Err(err)) => {
                warn!(
                    event = events::EXTRACTION_FAILED,
                    component = COMPONENT,
                    listener_id,
                    execution_id,
                    reason = fields::REASON_EXTRACTION_ERROR,
                    err = %err,
                    "datasource extraction failed; publishing nothing for this execution"
                );
                return;
            }
            Err(payload) => {
                warn!(
                    event = events::EXTRACTION_FAILED,
                    component = COMPONENT,
                    listener_id,
                    execution_id,
                    reason = fields::REASON_PANIC,
                    err = fields::panic_message(payload.as_ref()).as_str(),
                    "datasource extraction panicked; publishing nothing for this execution"
                );
                return;
            }
        };

        if datasource_events.is_empty() {
            debug!(
                event = events::EXTRACTION_EMPTY,
                component = COMPONENT,
                listener_id,
                execution_id,
                "execution touched no datasources"
            );
            return;
        }

        for datasource_event in &datasource_events {
            self.broadcaster
                .broadcast(execution_id, datasource_event)
                .await;
        }
    }
}
