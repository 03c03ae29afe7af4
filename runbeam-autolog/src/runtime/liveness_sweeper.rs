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

//! Background liveness sweep that evicts unreachable subscribers.

use crate::control_plane::subscriber_registry::SubscriberRegistry;
use crate::observability::{events, fields};
use crate::subscriber::SubscriberHandle;
use futures::future::join_all;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

const COMPONENT: &str = "liveness_sweeper";

/// Cancellable repeating task that pings every registered subscriber and
/// unregisters each one whose ping errors, times out, or panics.
///
/// Ping failures are the sole eviction trigger; the broadcast path never
/// evicts. The task is tied to one attach cycle: [`shutdown`](Self::shutdown)
/// signals the loop and joins the handle, so nothing outlives `stop()`. The
/// first sweep runs one full interval after start.
pub(crate) struct LivenessSweeper {
    sweeper_id: String,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl LivenessSweeper {
    /// Spawns the sweep loop over the given registry.
    pub(crate) fn start(
        registry: Arc<SubscriberRegistry>,
        sweep_interval: Duration,
        remote_call_timeout: Duration,
    ) -> Self {
        let sweeper_id = Uuid::new_v4().to_string();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let loop_sweeper_id = sweeper_id.clone();
        let task = tokio::spawn(async move {
            let sweep_context = fields::SweepContext::with_current_thread(loop_sweeper_id);

            info!(
                event = events::SWEEPER_STARTED,
                component = COMPONENT,
                sweeper_id = sweep_context.sweeper_id.as_str(),
                sweeper_thread = sweep_context.sweeper_thread.as_str(),
                sweep_interval_ms = sweep_interval.as_millis() as u64,
                "liveness sweeper started"
            );

            let mut ticker = tokio::time::interval_at(
                tokio::time::Instant::now() + sweep_interval,
                sweep_interval,
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        Self::sweep_once(&sweep_context, &registry, remote_call_timeout).await;
                    }
                    _ = shutdown_rx.changed() => {
                        info!(
                            event = events::SWEEPER_STOPPED,
                            component = COMPONENT,
                            sweeper_id = sweep_context.sweeper_id.as_str(),
                            sweeper_thread = sweep_context.sweeper_thread.as_str(),
                            "liveness sweeper stopped"
                        );
                        break;
                    }
                }
            }
        });

        Self {
            sweeper_id,
            shutdown_tx,
            task,
        }
    }

    /// Returns the correlation id carried in this sweeper's log events.
    pub(crate) fn sweeper_id(&self) -> &str {
        &self.sweeper_id
    }

    /// Signals the sweep loop and awaits its termination.
    pub(crate) async fn shutdown(self) {
        // An already-dropped receiver means the task has exited on its own.
        let _ = self.shutdown_tx.send(true);

        if let Err(err) = self.task.await {
            warn!(
                event = events::SWEEPER_JOIN_FAILED,
                component = COMPONENT,
                sweeper_id = self.sweeper_id.as_str(),
                err = %err,
                "liveness sweeper task join failed"
            );
        }
    }

    async fn sweep_once(
        sweep_context: &fields::SweepContext,
        registry: &SubscriberRegistry,
        remote_call_timeout: Duration,
    ) {
        let subscribers = registry.snapshot().await;
        let probed = subscribers.len();

        let probes = subscribers.iter().map(|(replica_id, handle)| {
            Self::probe_one(sweep_context, replica_id, handle.clone(), remote_call_timeout)
        });
        let failures: Vec<&String> = join_all(probes)
            .await
            .into_iter()
            .zip(subscribers.iter())
            .filter(|(alive, _)| !alive)
            .map(|(_, (replica_id, _))| replica_id)
            .collect();

        let mut evicted = 0_usize;
        for replica_id in failures {
            if registry.unregister(replica_id).await {
                evicted += 1;
                info!(
                    event = events::SWEEP_EVICT,
                    component = COMPONENT,
                    sweeper_id = sweep_context.sweeper_id.as_str(),
                    sweeper_thread = sweep_context.sweeper_thread.as_str(),
                    replica_id = replica_id.as_str(),
                    reason = fields::REASON_PING_ERROR,
                    "evicted unreachable subscriber"
                );
            }
        }

        debug!(
            event = events::SWEEP_SUMMARY,
            component = COMPONENT,
            sweeper_id = sweep_context.sweeper_id.as_str(),
            sweeper_thread = sweep_context.sweeper_thread.as_str(),
            probed,
            evicted,
            "sweep finished"
        );
    }

    /// Returns whether the subscriber answered its liveness probe.
    async fn probe_one(
        sweep_context: &fields::SweepContext,
        replica_id: &str,
        handle: Arc<dyn SubscriberHandle>,
        remote_call_timeout: Duration,
    ) -> bool {
        let probe = AssertUnwindSafe(handle.ping()).catch_unwind();

        match tokio::time::timeout(remote_call_timeout, probe).await {
            Ok(Ok(Ok(()))) => true,
            Ok(Ok(Err(err))) => {
                warn!(
                    event = events::SWEEP_EVICT,
                    component = COMPONENT,
                    sweeper_id = sweep_context.sweeper_id.as_str(),
                    replica_id,
                    reason = fields::REASON_PING_ERROR,
                    err = %err,
                    "subscriber ping failed"
                );
                false
            }
            Ok(Err(payload)) => {
                warn!(
                    event = events::SWEEP_EVICT,
                    component = COMPONENT,
                    sweeper_id = sweep_context.sweeper_id.as_str(),
                    replica_id,
                    reason = fields::REASON_PANIC,
                    err = fields::panic_message(payload.as_ref()).as_str(),
                    "subscriber ping panicked"
                );
                false
            }
            Err(_) => {
                warn!(
                    event = events::SWEEP_EVICT,
                    component = COMPONENT,
                    sweeper_id = sweep_context.sweeper_id.as_str(),
                    replica_id,
                    reason = fields::REASON_TIMEOUT,
                    timeout_ms = remote_call_timeout.as_millis() as u64,
                    "subscriber ping timed out"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LivenessSweeper;
    use crate::control_plane::subscriber_registry::SubscriberRegistry;
    use crate::subscriber::{SubscriberError, SubscriberHandle};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    enum PingScript {
        Succeed,
        Fail,
        Hang,
    }

    struct ProbedSubscriber {
        replica_id: String,
        script: PingScript,
        pings: AtomicUsize,
    }

    impl ProbedSubscriber {
        fn new(replica_id: &str, script: PingScript) -> Arc<Self> {
            Arc::new(Self {
                replica_id: replica_id.to_string(),
                script,
                pings: AtomicUsize::new(0),
            })
        }

        fn pings(&self) -> usize {
            self.pings.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SubscriberHandle for ProbedSubscriber {
        fn replica_id(&self) -> String {
            self.replica_id.clone()
        }

        async fn notify(
            &self,
            _path: &str,
            _version: &str,
            _format: &str,
        ) -> Result<(), SubscriberError> {
            Ok(())
        }

        async fn ping(&self) -> Result<(), SubscriberError> {
            self.pings.fetch_add(1, Ordering::SeqCst);
            match self.script {
                PingScript::Succeed => Ok(()),
                PingScript::Fail => Err(SubscriberError::new("replica unreachable")),
                PingScript::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(())
                }
            }
        }
    }

    async fn wait_for_size(registry: &SubscriberRegistry, expected: usize, deadline: Duration) {
        let started = std::time::Instant::now();
        while registry.size().await != expected {
            assert!(
                started.elapsed() < deadline,
                "registry did not reach size {expected} within {deadline:?}"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failing_ping_evicts_within_one_sweep_interval() {
        let registry = Arc::new(SubscriberRegistry::new());
        let healthy = ProbedSubscriber::new("replica-healthy", PingScript::Succeed);
        let unreachable = ProbedSubscriber::new("replica-unreachable", PingScript::Fail);
        registry.register(healthy.clone()).await;
        registry.register(unreachable.clone()).await;

        let sweeper = LivenessSweeper::start(
            registry.clone(),
            Duration::from_millis(50),
            Duration::from_secs(1),
        );

        wait_for_size(&registry, 1, Duration::from_secs(3)).await;
        assert_eq!(registry.ids().await, vec!["replica-healthy".to_string()]);
        assert!(unreachable.pings() >= 1);

        sweeper.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn hung_ping_counts_as_a_liveness_failure() {
        let registry = Arc::new(SubscriberRegistry::new());
        registry
            .register(ProbedSubscriber::new("replica-hung", PingScript::Hang))
            .await;

        let sweeper = LivenessSweeper::start(
            registry.clone(),
            Duration::from_millis(50),
            Duration::from_millis(100),
        );

        wait_for_size(&registry, 0, Duration::from_secs(3)).await;

        sweeper.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn shutdown_terminates_the_sweep_loop() {
        let registry = Arc::new(SubscriberRegistry::new());
        let probed = ProbedSubscriber::new("replica-probed", PingScript::Succeed);
        registry.register(probed.clone()).await;

        let sweeper = LivenessSweeper::start(
            registry.clone(),
            Duration::from_millis(50),
            Duration::from_secs(1),
        );

        let started = std::time::Instant::now();
        while probed.pings() == 0 {
            assert!(
                started.elapsed() < Duration::from_secs(3),
                "sweeper never probed the registered subscriber"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        sweeper.shutdown().await;

        let pings_at_shutdown = probed.pings();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(probed.pings(), pings_at_shutdown);
    }

    #[tokio::test]
    async fn sweeper_ids_are_distinct_per_instance() {
        let first = LivenessSweeper::start(
            Arc::new(SubscriberRegistry::new()),
            Duration::from_secs(60),
            Duration::from_secs(1),
        );
        let second = LivenessSweeper::start(
            Arc::new(SubscriberRegistry::new()),
            Duration::from_secs(60),
            Duration::from_secs(1),
        );

        assert_ne!(first.sweeper_id(), second.sweeper_id());

        first.shutdown().await;
        second.shutdown().await;
    }
}
