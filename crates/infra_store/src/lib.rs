//! Snapshot persistence infrastructure
//!
//! This crate provides the durable record store used by the claim and
//! ownership collections: one JSON snapshot file per collection, rewritten
//! in full on every mutation and reloaded at startup.
//!
//! See [`SnapshotStore`] for the load/save contract.

pub mod error;
pub mod snapshot;

pub use error::StorageError;
pub use snapshot::SnapshotStore;
