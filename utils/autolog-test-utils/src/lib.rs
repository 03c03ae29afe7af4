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

//! Shared fakes and helpers for the `runbeam-autolog` integration suite.

mod in_memory_query_engine;
pub use in_memory_query_engine::InMemoryQueryEngine;

mod scripted_subscribers;
pub use scripted_subscribers::{
    FailingNotifySubscriber, FailingPingSubscriber, HangingSubscriber, PanickingNotifySubscriber,
    RecordedNotify, RecordingSubscriber,
};

mod execution_fixtures;
pub use execution_fixtures::{
    join_execution, shaped_execution, single_scan_execution, FailingExtractor, PanickingExtractor,
    PlanShape,
};

mod helpers;
pub use helpers::{init_logging, wait_for_count};
