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

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by a subscriber endpoint for `notify` or `ping`.
///
/// Carries only a message; the remote transport behind a handle is opaque to
/// this crate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriberError {
    message: String,
}

impl SubscriberError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for SubscriberError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "subscriber call failed: {}", self.message)
    }
}

impl Error for SubscriberError {}

/// Remote handle to one registered subscriber.
///
/// A handle is identified by a stable replica id for its whole lifetime; two
/// handles reporting the same id are the same registration and the later one
/// replaces the earlier. Both calls may block on a remote endpoint and may
/// fail at any time; the endpoint's lifetime is external, which is why the
/// publisher sweeps for liveness instead of trusting registration.
///
/// Production implementations typically wrap an RPC client; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait SubscriberHandle: Send + Sync {
    /// Stable identity token used as the registry key.
    fn replica_id(&self) -> String;

    /// Delivers one datasource access. Best effort; failures never evict.
    async fn notify(&self, path: &str, version: &str, format: &str)
        -> Result<(), SubscriberError>;

    /// Liveness probe. A failure evicts this subscriber during the next sweep.
    async fn ping(&self) -> Result<(), SubscriberError>;
}
