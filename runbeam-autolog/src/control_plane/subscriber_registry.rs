//! Subscriber-registry storage owner for the current attach cycle.

use crate::subscriber::SubscriberHandle;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Concurrency-safe map from replica id to subscriber handle.
///
/// The registry is the only shared mutable structure of an attach cycle. The
/// broadcast and sweep paths never iterate it under the lock: they take a
/// [`snapshot`](Self::snapshot) and work on the copy, so a subscriber added
/// after the snapshot may miss that event and one removed after it may still
/// receive it.
pub(crate) struct SubscriberRegistry {
    subscribers: Mutex<BTreeMap<String, Arc<dyn SubscriberHandle>>>,
}

impl SubscriberRegistry {
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Mutex::new(BTreeMap::new()),
        }
    }

    /// Upserts a handle under its replica id. Returns `true` only when the id
    /// was newly inserted; `false` means an earlier handle was replaced.
    pub(crate) async fn register(&self, handle: Arc<dyn SubscriberHandle>) -> bool {
        let replica_id = handle.replica_id();
        let mut subscribers = self.subscribers.lock().await;
        subscribers.insert(replica_id, handle).is_none()
    }

    /// Removes a registration. Returns `true` only when the id was present.
    pub(crate) async fn unregister(&self, replica_id: &str) -> bool {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.remove(replica_id).is_some()
    }

    /// Returns a point-in-time copy in ascending replica-id order, safe to
    /// iterate without the lock.
    pub(crate) async fn snapshot(&self) -> Vec<(String, Arc<dyn SubscriberHandle>)> {
        let subscribers = self.subscribers.lock().await;
        subscribers
            .iter()
            .map(|(id, handle)| (id.clone(), handle.clone()))
            .collect()
    }

    /// Returns the replica ids currently registered, in ascending order.
    pub(crate) async fn ids(&self) -> Vec<String> {
        let subscribers = self.subscribers.lock().await;
        subscribers.keys().cloned().collect()
    }

    /// Returns the current registration count.
    pub(crate) async fn size(&self) -> usize {
        let subscribers = self.subscribers.lock().await;
        subscribers.len()
    }

    /// Removes every registration and returns how many were removed.
    pub(crate) async fn clear(&self) -> usize {
        let mut subscribers = self.subscribers.lock().await;
        let cleared = subscribers.len();
        subscribers.clear();
        cleared
    }
}
