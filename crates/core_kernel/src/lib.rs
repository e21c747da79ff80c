//! Shared kernel for the contact directory core
//!
//! Holds the strongly-typed identifiers used by the claim and ownership
//! domains and the API layer. Everything else lives in the domain crates.

pub mod identifiers;

pub use identifiers::{ClaimRequestId, ContactId, OwnershipId, UserId};
