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

//! # runbeam-autolog
//!
//! `runbeam-autolog` is the broadcast core of the Runbeam autologging layer:
//! it attaches a listener to a host query engine, turns completed query
//! executions into normalized datasource-access events, and fans each event
//! out to a dynamic set of registered subscriber handles while isolating
//! subscriber failures from each other and from the engine. A background
//! sweep periodically pings every subscriber and evicts the unreachable ones.
//!
//! Typical usage is API-first and centered on [`EventPublisher`]: construct
//! one around your [`QueryEngine`] binding, `init()` it, and `register()`
//! subscriber handles. Internal modules are organized by domain layer to keep
//! behavior ownership explicit.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use runbeam_autolog::{
//!     AutologConfig, EventPublisher, QueryEngine, SubscriberHandle,
//! };
//!
//! # pub mod mock_engine {
//! #     use async_trait::async_trait;
//! #     use runbeam_autolog::{EngineError, ExecutionListener, QueryEngine};
//! #     use std::sync::Arc;
//! #
//! #     pub struct MockEngine;
//! #
//! #     #[async_trait]
//! #     impl QueryEngine for MockEngine {
//! #         fn active_session_id(&self) -> Option<String> {
//! #             Some("mock-session".to_string())
//! #         }
//! #
//! #         async fn attach_listener(
//! #             &self,
//! #             _listener: Arc<dyn ExecutionListener>,
//! #         ) -> Result<(), EngineError> {
//! #             Ok(())
//! #         }
//! #
//! #         async fn detach_listener(
//! #             &self,
//! #             _listener: Arc<dyn ExecutionListener>,
//! #         ) -> Result<(), EngineError> {
//! #             Ok(())
//! #         }
//! #     }
//! # }
//! # pub mod mock_subscriber {
//! #     use async_trait::async_trait;
//! #     use runbeam_autolog::{SubscriberError, SubscriberHandle};
//! #
//! #     pub struct MockSubscriber;
//! #
//! #     #[async_trait]
//! #     impl SubscriberHandle for MockSubscriber {
//! #         fn replica_id(&self) -> String {
//! #             "mock-replica".to_string()
//! #         }
//! #
//! #         async fn notify(
//! #             &self,
//! #             _path: &str,
//! #             _version: &str,
//! #             _format: &str,
//! #         ) -> Result<(), SubscriberError> {
//! #             Ok(())
//! #         }
//! #
//! #         async fn ping(&self) -> Result<(), SubscriberError> {
//! #             Ok(())
//! #         }
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let engine: Arc<dyn QueryEngine> = Arc::new(mock_engine::MockEngine);
//! let publisher = EventPublisher::new("quick-start", engine, AutologConfig::default());
//!
//! publisher.init().await.unwrap();
//!
//! let subscriber: Arc<dyn SubscriberHandle> = Arc::new(mock_subscriber::MockSubscriber);
//! publisher.register(subscriber).await.unwrap();
//! assert_eq!(publisher.subscriber_ids().await, vec!["mock-replica".to_string()]);
//!
//! publisher.stop().await;
//! # });
//! ```
//!
//! ## Lifecycle contract
//!
//! This doctest focuses on the lifecycle behavior exposed by the facade:
//! registration requires a running publisher, `init`/`stop` are idempotent,
//! and `stop` clears every registration.
//!
//! ```
//! use std::sync::Arc;
//! use runbeam_autolog::{AutologConfig, EventPublisher, QueryEngine, SubscriberHandle};
//!
//! # pub mod mock_engine {
//! #     use async_trait::async_trait;
//! #     use runbeam_autolog::{EngineError, ExecutionListener, QueryEngine};
//! #     use std::sync::Arc;
//! #
//! #     pub struct MockEngine;
//! #
//! #     #[async_trait]
//! #     impl QueryEngine for MockEngine {
//! #         fn active_session_id(&self) -> Option<String> {
//! #             Some("mock-session".to_string())
//! #         }
//! #
//! #         async fn attach_listener(
//! #             &self,
//! #             _listener: Arc<dyn ExecutionListener>,
//! #         ) -> Result<(), EngineError> {
//! #             Ok(())
//! #         }
//! #
//! #         async fn detach_listener(
//! #             &self,
//! #             _listener: Arc<dyn ExecutionListener>,
//! #         ) -> Result<(), EngineError> {
//! #             Ok(())
//! #         }
//! #     }
//! # }
//! # pub mod mock_subscriber {
//! #     use async_trait::async_trait;
//! #     use runbeam_autolog::{SubscriberError, SubscriberHandle};
//! #
//! #     pub struct MockSubscriber;
//! #
//! #     #[async_trait]
//! #     impl SubscriberHandle for MockSubscriber {
//! #         fn replica_id(&self) -> String {
//! #             "mock-replica".to_string()
//! #         }
//! #
//! #         async fn notify(
//! #             &self,
//! #             _path: &str,
//! #             _version: &str,
//! #             _format: &str,
//! #         ) -> Result<(), SubscriberError> {
//! #             Ok(())
//! #         }
//! #
//! #         async fn ping(&self) -> Result<(), SubscriberError> {
//! #             Ok(())
//! #         }
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let engine: Arc<dyn QueryEngine> = Arc::new(mock_engine::MockEngine);
//! let publisher = EventPublisher::new("contract", engine, AutologConfig::default());
//!
//! let subscriber: Arc<dyn SubscriberHandle> = Arc::new(mock_subscriber::MockSubscriber);
//! assert!(publisher.register(subscriber.clone()).await.is_err());
//!
//! publisher.init().await.unwrap();
//! publisher.init().await.unwrap();
//! assert!(publisher.register(subscriber).await.is_ok());
//! assert_eq!(publisher.subscriber_count().await, 1);
//!
//! publisher.stop().await;
//! publisher.stop().await;
//! assert_eq!(publisher.subscriber_count().await, 0);
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - API facade: outward [`EventPublisher`] surface
//! - Control plane: attach-cycle lifecycle and subscriber-registry ownership
//! - Data plane: execution-listener intake and per-event fan-out
//! - Extraction: plan-to-event derivation policy behind an injectable seam
//! - Runtime: liveness-sweep background-task boundary
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events/spans and does not unconditionally initialize a
//! global subscriber. Binaries/tests are responsible for one-time
//! `tracing_subscriber` initialization at process boundaries.

mod config;
pub use config::AutologConfig;

mod engine;
pub use engine::{EngineError, ExecutionListener, QueryEngine, QueryExecution};

mod event;
pub use event::DatasourceEvent;

mod plan;
pub use plan::PlanNode;

mod subscriber;
pub use subscriber::{SubscriberError, SubscriberHandle};

mod control_plane;
pub use control_plane::attachment::InitError;

mod data_plane;

mod extraction;
pub use extraction::datasource_extractor::{DatasourceExtractor, ExtractionError};
pub use extraction::plan_leaf_extractor::PlanLeafExtractor;

#[doc(hidden)]
pub mod observability;

mod runtime;

mod publisher;
pub use publisher::{EventPublisher, RegisterError};
