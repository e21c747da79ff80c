//! Contact Ownership Domain
//!
//! This crate owns the mapping from contact records to their owning users
//! and enforces the single-owner invariant: at most one ownership record
//! exists per contact at any time, even under concurrent approvals.
//!
//! [`OwnershipRegistry::create`] is the single linearization point for that
//! invariant; every other component (the claim workflow, the access guard,
//! batch imports) treats its answer as authoritative.

pub mod error;
pub mod ownership;
pub mod registry;

pub use error::OwnershipError;
pub use ownership::Ownership;
pub use registry::{ImportReport, ImportRow, OwnershipRegistry};
