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

//! Canonical structured field keys and value-format helpers.

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const PUBLISHER: &str = "publisher";
pub const SESSION_ID: &str = "session_id";
pub const EXECUTION_ID: &str = "execution_id";
pub const LISTENER_ID: &str = "listener_id";
pub const SWEEPER_ID: &str = "sweeper_id";
pub const SWEEPER_THREAD: &str = "sweeper_thread";

pub const REPLICA_ID: &str = "replica_id";
pub const PATH: &str = "path";
pub const VERSION: &str = "version";
pub const FORMAT: &str = "format";

pub const DELIVERED: &str = "delivered";
pub const FAILED: &str = "failed";
pub const EVICTED: &str = "evicted";
pub const CLEARED: &str = "cleared";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const REASON_NOTIFY_ERROR: &str = "notify_error";
pub const REASON_EXTRACTION_ERROR: &str = "extraction_error";
pub const REASON_PING_ERROR: &str = "ping_error";
pub const REASON_TIMEOUT: &str = "timeout";
pub const REASON_PANIC: &str = "panic";
pub const DEFAULT_SWEEPER_THREAD: &str = "unknown-thread";

/// Stable version literal reported when the engine cannot resolve one.
pub const UNKNOWN_VERSION: &str = "unknown";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SweepContext {
    pub sweeper_id: String,
    pub sweeper_thread: String,
}

impl SweepContext {
    pub fn new(sweeper_id: impl Into<String>, sweeper_thread: Option<&str>) -> Self {
        Self {
            sweeper_id: sweeper_id.into(),
            sweeper_thread: thread_name_or_default(sweeper_thread),
        }
    }

    pub fn with_current_thread(sweeper_id: impl Into<String>) -> Self {
        Self {
            sweeper_id: sweeper_id.into(),
            sweeper_thread: current_thread_name_or_default(),
        }
    }
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_SWEEPER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

/// Extracts a printable message from a caught panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub fn format_version(version: Option<&str>) -> String {
    version.unwrap_or(UNKNOWN_VERSION).to_string()
}
