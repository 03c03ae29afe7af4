//! Runtime.
//!
//! Background-task boundaries: the liveness sweeper runs as a cancellable
//! tokio task tied to one attach cycle and never outlives `stop()`.

pub(crate) mod liveness_sweeper;
