//! Observability layer.
//!
//! Canonical event names and structured field keys emitted via `tracing`.
//! Library code only emits events; subscriber installation belongs to the
//! embedding process.

pub mod events;
pub mod fields;
