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

//! In-memory [`QueryEngine`] fake with recorded attachments and synchronous
//! execution dispatch.

use async_trait::async_trait;
use runbeam_autolog::{EngineError, ExecutionListener, QueryEngine, QueryExecution};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Test double for the engine seam.
///
/// Attach/detach calls are recorded so tests can assert listener identity and
/// attach counts. `emit_execution` dispatches a completed execution to every
/// currently attached listener and awaits each callback, so broadcasts have
/// finished (within their timeout bounds) by the time it returns.
pub struct InMemoryQueryEngine {
    session_id: Mutex<Option<String>>,
    attached: Mutex<Vec<Arc<dyn ExecutionListener>>>,
    attach_calls: AtomicU64,
    fail_attach: Mutex<Option<String>>,
}

impl InMemoryQueryEngine {
    /// Creates an engine with an active session.
    pub fn with_session(session_id: &str) -> Arc<Self> {
        Arc::new(Self {
            session_id: Mutex::new(Some(session_id.to_string())),
            attached: Mutex::new(Vec::new()),
            attach_calls: AtomicU64::new(0),
            fail_attach: Mutex::new(None),
        })
    }

    /// Creates an engine with no active session.
    pub fn without_session() -> Arc<Self> {
        Arc::new(Self {
            session_id: Mutex::new(None),
            attached: Mutex::new(Vec::new()),
            attach_calls: AtomicU64::new(0),
            fail_attach: Mutex::new(None),
        })
    }

    /// Ends the current session; later `init` calls will fail.
    pub fn clear_session(&self) {
        *self.session_id.lock().expect("session lock") = None;
    }

    /// Makes every subsequent attach call fail with the given message.
    pub fn fail_attaches_with(&self, message: &str) {
        *self.fail_attach.lock().expect("fail-attach lock") = Some(message.to_string());
    }

    /// Returns the listeners currently attached, in attach order.
    pub fn attached_listeners(&self) -> Vec<Arc<dyn ExecutionListener>> {
        self.attached.lock().expect("attached lock").clone()
    }

    /// Returns how many attach calls the engine accepted.
    pub fn attach_count(&self) -> u64 {
        self.attach_calls.load(Ordering::SeqCst)
    }

    /// Dispatches a completed execution to every attached listener, awaiting
    /// each callback before returning. Returns how many listeners were
    /// invoked.
    pub async fn emit_execution(&self, execution: QueryExecution) -> usize {
        let listeners = self.attached_listeners();
        debug!(
            execution_id = execution.execution_id,
            listeners = listeners.len(),
            "dispatching completed execution"
        );

        for listener in &listeners {
            listener.on_execution_end(execution.clone()).await;
        }
        listeners.len()
    }
}

#[async_trait]
impl QueryEngine for InMemoryQueryEngine {
    fn active_session_id(&self) -> Option<String> {
        self.session_id.lock().expect("session lock").clone()
    }

    async fn attach_listener(
        &self,
        listener: Arc<dyn ExecutionListener>,
    ) -> Result<(), EngineError> {
        if let Some(message) = self.fail_attach.lock().expect("fail-attach lock").as_ref() {
            return Err(EngineError::new(message.clone()));
        }

        self.attached.lock().expect("attached lock").push(listener);
        self.attach_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn detach_listener(
        &self,
        listener: Arc<dyn ExecutionListener>,
    ) -> Result<(), EngineError> {
        let mut attached = self.attached.lock().expect("attached lock");
        let before = attached.len();
        attached.retain(|candidate| !Arc::ptr_eq(candidate, &listener));

        if attached.len() == before {
            return Err(EngineError::new("listener was not attached"));
        }
        Ok(())
    }
}
