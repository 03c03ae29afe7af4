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

use crate::config::AutologConfig;
use crate::control_plane::attachment::{ActiveAttachment, InitError};
use crate::engine::QueryEngine;
use crate::extraction::datasource_extractor::DatasourceExtractor;
use crate::extraction::plan_leaf_extractor::PlanLeafExtractor;
use crate::observability::events;
use crate::subscriber::SubscriberHandle;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const COMPONENT: &str = "event_publisher";

/// Failures for subscriber registration.
#[derive(Debug)]
pub enum RegisterError {
    /// The publisher is not running; there is no implicit initialization.
    NotInitialized,
}

impl Display for RegisterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterError::NotInitialized => {
                write!(f, "publisher is not initialized; call init() first")
            }
        }
    }
}

impl Error for RegisterError {}

/// Façade owning the listener-attachment lifecycle, the subscriber registry,
/// and the liveness sweeper.
///
/// An `EventPublisher` is an explicit, injected object: embedders construct
/// one per engine and tests construct isolated instances around fakes. The
/// lifecycle is `uninitialized → initialized → stopped → (re-)initialized`;
/// [`init`](Self::init) and [`stop`](Self::stop) are idempotent, and
/// [`register`](Self::register) requires a running publisher.
///
/// Concurrent `init` callers serialize on the attachment slot and observe
/// exactly one attached listener; a repeated `init` is a no-op preserving the
/// first caller's sweep interval until a stop/init cycle.
pub struct EventPublisher {
    name: String,
    engine: Arc<dyn QueryEngine>,
    config: AutologConfig,
    extractor: Arc<dyn DatasourceExtractor>,
    attachment: Mutex<Option<ActiveAttachment>>,
}

impl EventPublisher {
    /// Creates an uninitialized publisher using the default plan-leaf
    /// extraction strategy.
    pub fn new(name: &str, engine: Arc<dyn QueryEngine>, config: AutologConfig) -> Self {
        Self::with_extractor(name, engine, config, Arc::new(PlanLeafExtractor::new()))
    }

    /// Creates an uninitialized publisher with an injected extraction
    /// strategy.
    pub fn with_extractor(
        name: &str,
        engine: Arc<dyn QueryEngine>,
        config: AutologConfig,
        extractor: Arc<dyn DatasourceExtractor>,
    ) -> Self {
        Self {
            name: name.to_string(),
            engine,
            config,
            extractor,
            attachment: Mutex::new(None),
        }
    }

    /// Attaches to the engine using the configured sweep interval.
    pub async fn init(&self) -> Result<(), InitError> {
        self.init_with_sweep_interval(self.config.sweep_interval())
            .await
    }

    /// Attaches to the engine with an explicit sweep interval.
    ///
    /// Idempotent: when a listener is already attached this is a logged no-op
    /// and the requested interval is ignored.
    pub async fn init_with_sweep_interval(&self, sweep_interval: Duration) -> Result<(), InitError> {
        let mut attachment = self.attachment.lock().await;

        if attachment.is_some() {
            debug!(
                event = events::PUBLISHER_INIT_NOOP,
                component = COMPONENT,
                publisher = self.name.as_str(),
                "already initialized; keeping existing listener, registry, and sweeper"
            );
            return Ok(());
        }

        debug!(
            event = events::PUBLISHER_INIT_START,
            component = COMPONENT,
            publisher = self.name.as_str(),
            sweep_interval_ms = sweep_interval.as_millis() as u64,
            "initializing publisher"
        );

        match ActiveAttachment::establish(
            &self.name,
            &self.engine,
            self.extractor.clone(),
            sweep_interval,
            self.config.remote_call_timeout(),
        )
        .await
        {
            Ok(established) => {
                *attachment = Some(established);
                info!(
                    event = events::PUBLISHER_INIT_OK,
                    component = COMPONENT,
                    publisher = self.name.as_str(),
                    "publisher initialized"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    event = events::PUBLISHER_INIT_FAILED,
                    component = COMPONENT,
                    publisher = self.name.as_str(),
                    err = %err,
                    "publisher initialization failed"
                );
                Err(err)
            }
        }
    }

    /// Detaches from the engine, terminates the sweeper, and clears every
    /// registered subscriber. Idempotent: stopping an uninitialized publisher
    /// is a logged no-op.
    pub async fn stop(&self) {
        let mut attachment = self.attachment.lock().await;

        let Some(active) = attachment.take() else {
            debug!(
                event = events::PUBLISHER_STOP_NOOP,
                component = COMPONENT,
                publisher = self.name.as_str(),
                "not initialized; nothing to stop"
            );
            return;
        };

        debug!(
            event = events::PUBLISHER_STOP_START,
            component = COMPONENT,
            publisher = self.name.as_str(),
            "stopping publisher"
        );

        active.teardown(&self.name, &self.engine).await;

        info!(
            event = events::PUBLISHER_STOP_OK,
            component = COMPONENT,
            publisher = self.name.as_str(),
            "publisher stopped"
        );
    }

    /// Registers a subscriber under its replica id, replacing any earlier
    /// handle with the same id. Fails when the publisher is not running.
    pub async fn register(
        &self,
        subscriber: Arc<dyn SubscriberHandle>,
    ) -> Result<(), RegisterError> {
        let attachment = self.attachment.lock().await;

        let Some(active) = attachment.as_ref() else {
            warn!(
                event = events::SUBSCRIBER_REGISTER_REJECTED,
                component = COMPONENT,
                publisher = self.name.as_str(),
                replica_id = subscriber.replica_id().as_str(),
                "register rejected: publisher is not initialized"
            );
            return Err(RegisterError::NotInitialized);
        };

        let replica_id = subscriber.replica_id();
        let newly_inserted = active.registry().register(subscriber).await;

        if newly_inserted {
            info!(
                event = events::SUBSCRIBER_REGISTER_OK,
                component = COMPONENT,
                publisher = self.name.as_str(),
                replica_id = replica_id.as_str(),
                "subscriber registered"
            );
        } else {
            info!(
                event = events::SUBSCRIBER_REGISTER_REPLACED,
                component = COMPONENT,
                publisher = self.name.as_str(),
                replica_id = replica_id.as_str(),
                "subscriber re-registered; previous handle replaced"
            );
        }

        Ok(())
    }

    /// Returns the replica ids currently registered, in ascending order.
    /// Empty when the publisher is not running.
    pub async fn subscriber_ids(&self) -> Vec<String> {
        let attachment = self.attachment.lock().await;
        match attachment.as_ref() {
            Some(active) => active.registry().ids().await,
            None => Vec::new(),
        }
    }

    /// Returns the current registration count. Zero when not running.
    pub async fn subscriber_count(&self) -> usize {
        let attachment = self.attachment.lock().await;
        match attachment.as_ref() {
            Some(active) => active.registry().size().await,
            None => 0,
        }
    }

    /// Returns whether a listener is currently attached.
    pub async fn is_active(&self) -> bool {
        self.attachment.lock().await.is_some()
    }
}
