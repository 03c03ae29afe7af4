/********************************************************************************
 * Copyright (c) 2025 Contributors to the Runbeam project
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use crate::plan::PlanNode;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Failure reported by the engine seam for listener attach/detach.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "engine call failed: {}", self.message)
    }
}

impl Error for EngineError {}

/// One completed query execution as reported by the engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryExecution {
    pub execution_id: u64,
    pub plan: PlanNode,
}

impl QueryExecution {
    pub fn new(execution_id: u64, plan: PlanNode) -> Self {
        Self { execution_id, plan }
    }
}

/// Callback attached to the engine's execution-completed stream.
///
/// Implementations must never fail the engine path: the callback returns
/// nothing and is expected to contain its own errors.
#[async_trait]
pub trait ExecutionListener: Send + Sync {
    async fn on_execution_end(&self, execution: QueryExecution);
}

/// Seam to the host query engine.
///
/// The publisher attaches at most one [`ExecutionListener`] and only while the
/// engine reports an active session. Listener identity for detach follows the
/// `Arc` pointer, so engines should compare with [`Arc::ptr_eq`].
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Returns the current session id, or `None` when no session is active.
    fn active_session_id(&self) -> Option<String>;

    async fn attach_listener(
        &self,
        listener: Arc<dyn ExecutionListener>,
    ) -> Result<(), EngineError>;

    async fn detach_listener(
        &self,
        listener: Arc<dyn ExecutionListener>,
    ) -> Result<(), EngineError>;
}
