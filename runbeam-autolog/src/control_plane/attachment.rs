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

//! Attach-cycle orchestration: listener, registry, and sweeper as one unit.

use crate::control_plane::subscriber_registry::SubscriberRegistry;
use crate::data_plane::event_broadcaster::EventBroadcaster;
use crate::data_plane::execution_listener::DatasourceEventListener;
use crate::engine::{EngineError, ExecutionListener, QueryEngine};
use crate::extraction::datasource_extractor::DatasourceExtractor;
use crate::observability::events;
use crate::runtime::liveness_sweeper::LivenessSweeper;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const COMPONENT: &str = "attachment";

/// Failures establishing an attach cycle.
#[derive(Debug)]
pub enum InitError {
    /// The engine reports no active session to attach to.
    NoActiveSession,
    /// A zero sweep interval would run the sweep loop hot.
    InvalidSweepInterval,
    /// The engine refused the execution listener.
    ListenerAttach(EngineError),
}

impl Display for InitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::NoActiveSession => write!(f, "no active engine session"),
            InitError::InvalidSweepInterval => {
                write!(f, "sweep interval must be greater than zero")
            }
            InitError::ListenerAttach(err) => {
                write!(f, "failed to attach execution listener: {err}")
            }
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InitError::ListenerAttach(err) => Some(err),
            _ => None,
        }
    }
}

/// One live attach cycle: the attached listener, the cycle's registry, and the
/// running sweeper. Dropped state never leaks across cycles — teardown detaches
/// the listener, joins the sweeper, and clears the registry, and a re-init
/// builds everything fresh.
pub(crate) struct ActiveAttachment {
    session_id: String,
    listener: Arc<DatasourceEventListener>,
    registry: Arc<SubscriberRegistry>,
    sweeper: LivenessSweeper,
}

impl ActiveAttachment {
    /// Builds the listener chain, attaches it to the engine, and starts the
    /// sweeper. Fails without partial state: the sweeper is only spawned after
    /// the engine has accepted the listener, and a refused listener leaves
    /// nothing behind.
    pub(crate) async fn establish(
        publisher_name: &str,
        engine: &Arc<dyn QueryEngine>,
        extractor: Arc<dyn DatasourceExtractor>,
        sweep_interval: Duration,
        remote_call_timeout: Duration,
    ) -> Result<Self, InitError> {
        if sweep_interval.is_zero() {
            return Err(InitError::InvalidSweepInterval);
        }

        let session_id = engine
            .active_session_id()
            .ok_or(InitError::NoActiveSession)?;

        let registry = Arc::new(SubscriberRegistry::new());
        let broadcaster = EventBroadcaster::new(registry.clone(), remote_call_timeout);
        let listener = Arc::new(DatasourceEventListener::new(extractor, broadcaster));

        let execution_listener: Arc<dyn ExecutionListener> = listener.clone();
        if let Err(err) = engine.attach_listener(execution_listener).await {
            warn!(
                event = events::LISTENER_ATTACH_FAILED,
                component = COMPONENT,
                publisher = publisher_name,
                session_id = session_id.as_str(),
                err = %err,
                "engine refused the execution listener"
            );
            return Err(InitError::ListenerAttach(err));
        }

        let sweeper =
            LivenessSweeper::start(registry.clone(), sweep_interval, remote_call_timeout);

        info!(
            event = events::LISTENER_ATTACH_OK,
            component = COMPONENT,
            publisher = publisher_name,
            session_id = session_id.as_str(),
            listener_id = listener.listener_id(),
            sweeper_id = sweeper.sweeper_id(),
            sweep_interval_ms = sweep_interval.as_millis() as u64,
            "execution listener attached"
        );

        Ok(Self {
            session_id,
            listener,
            registry,
            sweeper,
        })
    }

    pub(crate) fn registry(&self) -> &SubscriberRegistry {
        &self.registry
    }

    /// Detaches the listener, terminates the sweeper, and clears the registry.
    ///
    /// Detach failures are logged and swallowed: the cycle's registry has been
    /// cleared by then, so a stale listener left attached broadcasts to nobody.
    pub(crate) async fn teardown(self, publisher_name: &str, engine: &Arc<dyn QueryEngine>) {
        let execution_listener: Arc<dyn ExecutionListener> = self.listener.clone();
        match engine.detach_listener(execution_listener).await {
            Ok(()) => {
                info!(
                    event = events::LISTENER_DETACH_OK,
                    component = COMPONENT,
                    publisher = publisher_name,
                    session_id = self.session_id.as_str(),
                    listener_id = self.listener.listener_id(),
                    "execution listener detached"
                );
            }
            Err(err) => {
                warn!(
                    event = events::LISTENER_DETACH_FAILED,
                    component = COMPONENT,
                    publisher = publisher_name,
                    session_id = self.session_id.as_str(),
                    listener_id = self.listener.listener_id(),
                    err = %err,
                    "execution listener detach failed"
                );
            }
        }

        self.sweeper.shutdown().await;

        let cleared = self.registry.clear().await;
        info!(
            event = events::REGISTRY_CLEARED,
            component = COMPONENT,
            publisher = publisher_name,
            session_id = self.session_id.as_str(),
            cleared,
            "attach cycle torn down"
        );
    }
}
