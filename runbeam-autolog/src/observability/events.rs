//! Canonical structured event names used across `runbeam-autolog`.

// Publisher lifecycle events.
pub const PUBLISHER_INIT_START: &str = "publisher_init_start";
pub const PUBLISHER_INIT_OK: &str = "publisher_init_ok";
pub const PUBLISHER_INIT_NOOP: &str = "publisher_init_noop";
pub const PUBLISHER_INIT_FAILED: &str = "publisher_init_failed";
pub const PUBLISHER_STOP_START: &str = "publisher_stop_start";
pub const PUBLISHER_STOP_OK: &str = "publisher_stop_ok";
pub const PUBLISHER_STOP_NOOP: &str = "publisher_stop_noop";
pub const SUBSCRIBER_REGISTER_OK: &str = "subscriber_register_ok";
pub const SUBSCRIBER_REGISTER_REPLACED: &str = "subscriber_register_replaced";
pub const SUBSCRIBER_REGISTER_REJECTED: &str = "subscriber_register_rejected";
pub const REGISTRY_CLEARED: &str = "registry_cleared";

// Engine listener attachment events.
pub const LISTENER_ATTACH_OK: &str = "listener_attach_ok";
pub const LISTENER_ATTACH_FAILED: &str = "listener_attach_failed";
pub const LISTENER_DETACH_OK: &str = "listener_detach_ok";
pub const LISTENER_DETACH_FAILED: &str = "listener_detach_failed";

// Execution intake and broadcast events.
pub const EXECUTION_RECEIVED: &str = "execution_received";
pub const EXTRACTION_FAILED: &str = "extraction_failed";
pub const EXTRACTION_EMPTY: &str = "extraction_empty";
pub const NOTIFY_ATTEMPT: &str = "notify_attempt";
pub const NOTIFY_OK: &str = "notify_ok";
pub const NOTIFY_FAILED: &str = "notify_failed";
pub const NOTIFY_TIMEOUT: &str = "notify_timeout";
pub const NOTIFY_PANICKED: &str = "notify_panicked";
pub const BROADCAST_SUMMARY: &str = "broadcast_summary";

// Liveness sweep events.
pub const SWEEPER_STARTED: &str = "sweeper_started";
pub const SWEEPER_STOPPED: &str = "sweeper_stopped";
pub const SWEEPER_JOIN_FAILED: &str = "sweeper_join_failed";
pub const SWEEP_EVICT: &str = "sweep_evict";
pub const SWEEP_SUMMARY: &str = "sweep_summary";
