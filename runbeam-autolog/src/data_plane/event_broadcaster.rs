//! Fan-out delivery of one datasource event to a registry snapshot.

use crate::control_plane::subscriber_registry::SubscriberRegistry;
use crate::event::DatasourceEvent;
use crate::observability::{events, fields};
use crate::subscriber::SubscriberHandle;
use futures::future::join_all;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const COMPONENT: &str = "event_broadcaster";

/// Outcome counts for one broadcast, logged and used by unit tests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BroadcastReport {
    pub(crate) delivered: usize,
    pub(crate) failed: usize,
}

/// Delivers events to every registered subscriber independently.
///
/// Each `notify` call is bounded by the remote-call timeout and shielded from
/// panics; a failed, timed-out, or panicked delivery is logged and skipped so
/// the remaining subscribers still receive the event. Delivery failures never
/// evict — eviction belongs to the liveness sweep alone.
pub(crate) struct EventBroadcaster {
    registry: Arc<SubscriberRegistry>,
    remote_call_timeout: Duration,
}

impl EventBroadcaster {
    pub(crate) fn new(registry: Arc<SubscriberRegistry>, remote_call_timeout: Duration) -> Self {
        Self {
            registry,
            remote_call_timeout,
        }
    }

    /// Broadcasts one event to a snapshot of the current subscribers, invoking
    /// every `notify` concurrently.
    pub(crate) async fn broadcast(
        &self,
        execution_id: u64,
        event: &DatasourceEvent,
    ) -> BroadcastReport {
        let subscribers = self.registry.snapshot().await;

        let deliveries = subscribers.iter().map(|(replica_id, handle)| {
            self.notify_one(execution_id, replica_id, handle.clone(), event)
        });
        let outcomes = join_all(deliveries).await;

        let delivered = outcomes.iter().filter(|ok| **ok).count();
        let report = BroadcastReport {
            delivered,
            failed: outcomes.len() - delivered,
        };

        debug!(
            event = events::BROADCAST_SUMMARY,
            component = COMPONENT,
            execution_id,
            path = event.path.as_str(),
            delivered = report.delivered,
            failed = report.failed,
            "broadcast finished"
        );

        report
    }

    async fn notify_one(
        &self,
        execution_id: u64,
        replica_id: &str,
        handle: Arc<dyn SubscriberHandle>,
        event: &DatasourceEvent,
    ) -> bool {
        debug!(
            event = events::NOTIFY_ATTEMPT,
            component = COMPONENT,
            execution_id,
            replica_id,
            path = event.path.as_str(),
            version = event.version.as_str(),
            format = event.format.as_str(),
            "attempting subscriber notify"
        );

        let call = AssertUnwindSafe(handle.notify(&event.path, &event.version, &event.format))
            .catch_unwind();

        match tokio::time::timeout(self.remote_call_timeout, call).await {
            Ok(Ok(Ok(()))) => {
                debug!(
                    event = events::NOTIFY_OK,
                    component = COMPONENT,
                    execution_id,
                    replica_id,
                    path = event.path.as_str(),
                    "subscriber notify succeeded"
                );
                true
            }
            Ok(Ok(Err(err))) => {
                warn!(
                    event = events::NOTIFY_FAILED,
                    component = COMPONENT,
                    execution_id,
                    replica_id,
                    path = event.path.as_str(),
                    reason = fields::REASON_NOTIFY_ERROR,
                    err = %err,
                    "subscriber notify failed; skipping subscriber for this event"
                );
                false
            }
            Ok(Err(payload)) => {
                warn!(
                    event = events::NOTIFY_PANICKED,
                    component = COMPONENT,
                    execution_id,
                    replica_id,
                    path = event.path.as_str(),
                    reason = fields::REASON_PANIC,
                    err = fields::panic_message(payload.as_ref()).as_str(),
                    "subscriber notify panicked; skipping subscriber for this event"
                );
                false
            }
            Err(_) => {
                warn!(
                    event = events::NOTIFY_TIMEOUT,
                    component = COMPONENT,
                    execution_id,
                    replica_id,
                    path = event.path.as_str(),
                    reason = fields::REASON_TIMEOUT,
                    timeout_ms = self.remote_call_timeout.as_millis() as u64,
                    "subscriber notify timed out; skipping subscriber for this event"
                );
                false
            }
        }
    }
}
