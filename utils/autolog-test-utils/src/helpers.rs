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

//! Shared test plumbing: logging init and bounded-wait helpers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Installs the test tracing subscriber once per process.
///
/// Uses `RUST_LOG` when set; later calls are no-ops so every test can call it
/// unconditionally.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Polls a shared counter until it reaches `expected`, panicking with the
/// label when the deadline passes first.
pub async fn wait_for_count(
    counter: &Arc<AtomicU64>,
    expected: u64,
    deadline: Duration,
    label: &str,
) {
    let started = Instant::now();
    loop {
        let current = counter.load(Ordering::SeqCst);
        if current >= expected {
            return;
        }
        assert!(
            started.elapsed() < deadline,
            "{label}: counter stuck at {current}, expected {expected} within {deadline:?}"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
