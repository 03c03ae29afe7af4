//! Data plane.
//!
//! Owns the event path from engine completion callback to subscriber notify:
//! the execution listener adapts completions into normalized events and the
//! broadcaster fans each event out to a registry snapshot. Nothing on this
//! path can fail the originating query.

pub(crate) mod event_broadcaster;
pub(crate) mod execution_listener;
