//! Control plane.
//!
//! Owns attach-cycle lifecycle and subscriber-registry storage. The publisher
//! façade delegates here for everything that mutates cycle state; the data
//! plane and runtime only read the registry via snapshots.

pub(crate) mod attachment;
pub(crate) mod subscriber_registry;
