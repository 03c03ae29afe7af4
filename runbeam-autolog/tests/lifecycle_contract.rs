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

mod support;

use autolog_test_utils::{init_logging, InMemoryQueryEngine, RecordingSubscriber};
use runbeam_autolog::{EventPublisher, InitError, RegisterError};
use std::sync::Arc;
use std::time::Duration;
use support::{make_engine, make_publisher, make_running_publisher};

#[tokio::test(flavor = "multi_thread")]
async fn repeated_init_keeps_the_originally_attached_listener() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("idempotent-init", &engine).await;

    publisher
        .init()
        .await
        .expect("repeated init should be a no-op");
    publisher
        .init_with_sweep_interval(Duration::from_secs(30))
        .await
        .expect("repeated init with another interval should be a no-op");

    assert_eq!(engine.attach_count(), 1);
    assert_eq!(engine.attached_listeners().len(), 1);
    assert!(publisher.is_active().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn init_after_stop_attaches_a_new_distinct_listener() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("restart", &engine).await;
    let first_listener = engine.attached_listeners()[0].clone();

    publisher.stop().await;
    assert!(engine.attached_listeners().is_empty());

    publisher.init().await.expect("re-init should succeed");
    let listeners = engine.attached_listeners();

    assert_eq!(listeners.len(), 1);
    assert!(!Arc::ptr_eq(&listeners[0], &first_listener));
    assert_eq!(engine.attach_count(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn stop_is_idempotent_and_clears_registrations() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("stop-twice", &engine).await;
    publisher
        .register(RecordingSubscriber::new("replica-a"))
        .await
        .expect("register should succeed while running");

    publisher.stop().await;
    publisher.stop().await;

    assert!(!publisher.is_active().await);
    assert_eq!(publisher.subscriber_count().await, 0);

    // A fresh cycle must not resurrect the old registration.
    publisher.init().await.expect("re-init should succeed");
    assert_eq!(publisher.subscriber_count().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn register_requires_a_running_publisher() {
    init_logging();

    let engine = make_engine();
    let publisher = make_publisher("register-gate", &engine);
    let subscriber = RecordingSubscriber::new("replica-a");

    let before_init = publisher.register(subscriber.clone()).await;
    assert!(matches!(before_init, Err(RegisterError::NotInitialized)));

    publisher.init().await.expect("init should succeed");
    publisher
        .register(subscriber.clone())
        .await
        .expect("register should succeed while running");

    publisher.stop().await;
    let after_stop = publisher.register(subscriber).await;
    assert!(matches!(after_stop, Err(RegisterError::NotInitialized)));
}

#[tokio::test(flavor = "multi_thread")]
async fn init_without_an_engine_session_fails_without_partial_state() {
    init_logging();

    let engine = InMemoryQueryEngine::without_session();
    let publisher = make_publisher("no-session", &engine);

    let error = publisher.init().await.expect_err("init should fail");

    assert!(matches!(error, InitError::NoActiveSession));
    assert_eq!(error.to_string(), "no active engine session");
    assert!(!publisher.is_active().await);
    assert_eq!(engine.attach_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_attach_refusal_surfaces_and_leaves_no_state() {
    init_logging();

    let engine = make_engine();
    engine.fail_attaches_with("listener slot exhausted");
    let publisher = make_publisher("attach-refused", &engine);

    let error = publisher.init().await.expect_err("init should fail");

    assert!(matches!(error, InitError::ListenerAttach(_)));
    assert!(!publisher.is_active().await);
    assert!(engine.attached_listeners().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_sweep_interval_is_rejected() {
    init_logging();

    let engine = make_engine();
    let publisher = make_publisher("zero-interval", &engine);

    let error = publisher
        .init_with_sweep_interval(Duration::ZERO)
        .await
        .expect_err("zero interval should be rejected");

    assert!(matches!(error, InitError::InvalidSweepInterval));
    assert!(!publisher.is_active().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_init_storm_attaches_exactly_one_listener() {
    init_logging();

    let engine = make_engine();
    let publisher = Arc::new(make_publisher("init-storm", &engine));

    let mut join_handles = Vec::new();
    for _ in 0..8 {
        let contender: Arc<EventPublisher> = publisher.clone();
        join_handles.push(tokio::spawn(async move { contender.init().await }));
    }
    for join_handle in join_handles {
        join_handle
            .await
            .expect("init task should not panic")
            .expect("every concurrent init should succeed");
    }

    assert_eq!(engine.attach_count(), 1);
    assert_eq!(engine.attached_listeners().len(), 1);

    publisher.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn re_registering_the_same_replica_replaces_the_handle() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("re-register", &engine).await;

    publisher
        .register(RecordingSubscriber::new("replica-a"))
        .await
        .expect("first register should succeed");
    publisher
        .register(RecordingSubscriber::new("replica-a"))
        .await
        .expect("re-register should succeed");

    assert_eq!(publisher.subscriber_count().await, 1);
    assert_eq!(
        publisher.subscriber_ids().await,
        vec!["replica-a".to_string()]
    );

    publisher.stop().await;
}
