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

//! Scripted [`SubscriberHandle`] fakes for broadcast and sweep tests.

use async_trait::async_trait;
use runbeam_autolog::{SubscriberError, SubscriberHandle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded `notify` delivery.
pub type RecordedNotify = (String, String, String);

/// Well-behaved subscriber that records every delivery and counts probes.
pub struct RecordingSubscriber {
    replica_id: String,
    notifies: Mutex<Vec<RecordedNotify>>,
    notify_count: Arc<AtomicU64>,
    ping_count: Arc<AtomicU64>,
}

impl RecordingSubscriber {
    pub fn new(replica_id: &str) -> Arc<Self> {
        Arc::new(Self {
            replica_id: replica_id.to_string(),
            notifies: Mutex::new(Vec::new()),
            notify_count: Arc::new(AtomicU64::new(0)),
            ping_count: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Returns every recorded delivery in arrival order.
    pub fn recorded_notifies(&self) -> Vec<RecordedNotify> {
        self.notifies.lock().expect("notify store lock").clone()
    }

    /// Shared counter of deliveries, usable with [`wait_for_count`].
    ///
    /// [`wait_for_count`]: crate::wait_for_count
    pub fn notify_counter(&self) -> Arc<AtomicU64> {
        self.notify_count.clone()
    }

    pub fn ping_count(&self) -> u64 {
        self.ping_count.load(Ordering::SeqCst)
    }

    /// Shared counter of liveness probes, usable with [`wait_for_count`].
    ///
    /// [`wait_for_count`]: crate::wait_for_count
    pub fn ping_counter(&self) -> Arc<AtomicU64> {
        self.ping_count.clone()
    }
}

#[async_trait]
impl SubscriberHandle for RecordingSubscriber {
    fn replica_id(&self) -> String {
        self.replica_id.clone()
    }

    async fn notify(&self, path: &str, version: &str, format: &str) -> Result<(), SubscriberError> {
        self.notifies.lock().expect("notify store lock").push((
            path.to_string(),
            version.to_string(),
            format.to_string(),
        ));
        self.notify_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ping(&self) -> Result<(), SubscriberError> {
        self.ping_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Subscriber whose `notify` always errors while `ping` stays healthy.
///
/// The broken-notify-healthy-ping combination pins the eviction contract:
/// delivery failures alone never unregister a subscriber.
pub struct FailingNotifySubscriber {
    replica_id: String,
    notify_attempts: AtomicU64,
}

impl FailingNotifySubscriber {
    pub fn new(replica_id: &str) -> Arc<Self> {
        Arc::new(Self {
            replica_id: replica_id.to_string(),
            notify_attempts: AtomicU64::new(0),
        })
    }

    pub fn notify_attempts(&self) -> u64 {
        self.notify_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubscriberHandle for FailingNotifySubscriber {
    fn replica_id(&self) -> String {
        self.replica_id.clone()
    }

    async fn notify(
        &self,
        _path: &str,
        _version: &str,
        _format: &str,
    ) -> Result<(), SubscriberError> {
        self.notify_attempts.fetch_add(1, Ordering::SeqCst);
        Err(SubscriberError::new("scripted notify failure"))
    }

    async fn ping(&self) -> Result<(), SubscriberError> {
        Ok(())
    }
}

/// Subscriber whose `ping` always errors while `notify` succeeds.
pub struct FailingPingSubscriber {
    replica_id: String,
    ping_attempts: AtomicU64,
}

impl FailingPingSubscriber {
    pub fn new(replica_id: &str) -> Arc<Self> {
        Arc::new(Self {
            replica_id: replica_id.to_string(),
            ping_attempts: AtomicU64::new(0),
        })
    }

    pub fn ping_attempts(&self) -> u64 {
        self.ping_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubscriberHandle for FailingPingSubscriber {
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
        self.ping_attempts.fetch_add(1, Ordering::SeqCst);
        Err(SubscriberError::new("scripted ping failure"))
    }
}

/// Subscriber whose calls stall far beyond any sane remote-call timeout.
pub struct HangingSubscriber {
    replica_id: String,
}

impl HangingSubscriber {
    pub fn new(replica_id: &str) -> Arc<Self> {
        Arc::new(Self {
            replica_id: replica_id.to_string(),
        })
    }
}

#[async_trait]
impl SubscriberHandle for HangingSubscriber {
    fn replica_id(&self) -> String {
        self.replica_id.clone()
    }

    async fn notify(
        &self,
        _path: &str,
        _version: &str,
        _format: &str,
    ) -> Result<(), SubscriberError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), SubscriberError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

/// Subscriber whose `notify` panics; `ping` stays healthy.
pub struct PanickingNotifySubscriber {
    replica_id: String,
}

impl PanickingNotifySubscriber {
    pub fn new(replica_id: &str) -> Arc<Self> {
        Arc::new(Self {
            replica_id: replica_id.to_string(),
        })
    }
}

#[async_trait]
impl SubscriberHandle for PanickingNotifySubscriber {
    fn replica_id(&self) -> String {
        self.replica_id.clone()
    }

    async fn notify(
        &self,
        _path: &str,
        _version: &str,
        _format: &str,
    ) -> Result<(), SubscriberError> {
        panic!("scripted notify panic");
    }

    async fn ping(&self) -> Result<(), SubscriberError> {
        Ok(())
    }
}
