use autolog_test_utils::InMemoryQueryEngine;
use runbeam_autolog::{AutologConfig, EventPublisher};
use std::sync::Arc;

/// Config with a short remote-call timeout so hung-subscriber tests stay fast.
pub(crate) fn fast_config() -> AutologConfig {
    AutologConfig {
        sweep_interval_secs: 1,
        remote_call_timeout_ms: 200,
    }
}

pub(crate) fn make_engine() -> Arc<InMemoryQueryEngine> {
    InMemoryQueryEngine::with_session("test-session")
}

#[allow(dead_code)]
pub(crate) fn make_publisher(name: &str, engine: &Arc<InMemoryQueryEngine>) -> EventPublisher {
    EventPublisher::new(name, engine.clone(), fast_config())
}

#[allow(dead_code)]
pub(crate) async fn make_running_publisher(
    name: &str,
    engine: &Arc<InMemoryQueryEngine>,
) -> EventPublisher {
    let publisher = make_publisher(name, engine);
    publisher
        .init()
        .await
        .expect("publisher init should succeed");
    publisher
}
