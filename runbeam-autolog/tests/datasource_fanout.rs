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

use autolog_test_utils::{
    init_logging, join_execution, shaped_execution, single_scan_execution, PlanShape,
    RecordingSubscriber,
};
use runbeam_autolog::{PlanNode, QueryExecution};
use support::{make_engine, make_running_publisher};

const FORMATS: [&str; 3] = ["csv", "parquet", "json"];

#[tokio::test(flavor = "multi_thread")]
async fn every_format_and_shape_triggers_exactly_one_notify() {
    init_logging();

    let mut execution_id = 0_u64;
    for format in FORMATS {
        for shape in PlanShape::ALL {
            execution_id += 1;

            let engine = make_engine();
            let publisher = make_running_publisher("fanout-shape", &engine).await;
            let subscriber = RecordingSubscriber::new("replica-a");
            publisher
                .register(subscriber.clone())
                .await
                .expect("register should succeed");

            let path = format!("file:/data/orders.{format}");
            engine
                .emit_execution(shaped_execution(execution_id, shape, &path, format))
                .await;

            assert_eq!(
                subscriber.recorded_notifies(),
                vec![(path, "unknown".to_string(), format.to_string())],
                "shape {shape:?} over format {format} should deliver exactly one event"
            );

            publisher.stop().await;
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn join_of_two_datasources_produces_one_event_per_side() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("fanout-join", &engine).await;
    let subscriber = RecordingSubscriber::new("replica-a");
    publisher
        .register(subscriber.clone())
        .await
        .expect("register should succeed");

    engine
        .emit_execution(join_execution(
            1,
            "file:/data/left.csv",
            "csv",
            "file:/data/right.parquet",
            "parquet",
        ))
        .await;

    assert_eq!(
        subscriber.recorded_notifies(),
        vec![
            (
                "file:/data/left.csv".to_string(),
                "unknown".to_string(),
                "csv".to_string()
            ),
            (
                "file:/data/right.parquet".to_string(),
                "unknown".to_string(),
                "parquet".to_string()
            ),
        ]
    );

    publisher.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn resolved_datasource_versions_are_forwarded_verbatim() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("fanout-version", &engine).await;
    let subscriber = RecordingSubscriber::new("replica-a");
    publisher
        .register(subscriber.clone())
        .await
        .expect("register should succeed");

    engine
        .emit_execution(QueryExecution::new(
            1,
            PlanNode::versioned_scan("table:/orders", "delta", "42"),
        ))
        .await;

    assert_eq!(
        subscriber.recorded_notifies(),
        vec![(
            "table:/orders".to_string(),
            "42".to_string(),
            "delta".to_string()
        )]
    );

    publisher.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn executions_without_datasource_reads_publish_nothing() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("fanout-empty", &engine).await;
    let subscriber = RecordingSubscriber::new("replica-a");
    publisher
        .register(subscriber.clone())
        .await
        .expect("register should succeed");

    engine
        .emit_execution(QueryExecution::new(
            1,
            PlanNode::operator("LocalRelation", Vec::new()),
        ))
        .await;

    assert!(subscriber.recorded_notifies().is_empty());

    publisher.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn sequential_executions_deliver_in_completion_order() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("fanout-order", &engine).await;
    let subscriber = RecordingSubscriber::new("replica-a");
    publisher
        .register(subscriber.clone())
        .await
        .expect("register should succeed");

    engine
        .emit_execution(single_scan_execution(1, "file:/data/first.csv", "csv"))
        .await;
    engine
        .emit_execution(single_scan_execution(2, "file:/data/second.json", "json"))
        .await;

    let paths: Vec<String> = subscriber
        .recorded_notifies()
        .into_iter()
        .map(|(path, _, _)| path)
        .collect();
    assert_eq!(
        paths,
        vec![
            "file:/data/first.csv".to_string(),
            "file:/data/second.json".to_string()
        ]
    );

    publisher.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn events_after_stop_reach_no_subscribers() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("fanout-after-stop", &engine).await;
    let subscriber = RecordingSubscriber::new("replica-a");
    publisher
        .register(subscriber.clone())
        .await
        .expect("register should succeed");

    publisher.stop().await;
    let dispatched = engine
        .emit_execution(single_scan_execution(1, "file:/data/late.csv", "csv"))
        .await;

    assert_eq!(dispatched, 0, "stop must detach the listener");
    assert!(subscriber.recorded_notifies().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn fanout_reaches_every_registered_subscriber() {
    init_logging();

    let engine = make_engine();
    let publisher = make_running_publisher("fanout-many", &engine).await;
    let subscribers: Vec<_> = (0..4)
        .map(|index| RecordingSubscriber::new(&format!("replica-{index}")))
        .collect();
    for subscriber in &subscribers {
        publisher
            .register(subscriber.clone())
            .await
            .expect("register should succeed");
    }

    engine
        .emit_execution(single_scan_execution(1, "file:/data/orders.csv", "csv"))
        .await;

    for subscriber in &subscribers {
        assert_eq!(subscriber.recorded_notifies().len(), 1);
    }

    publisher.stop().await;
}
