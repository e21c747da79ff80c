//! Claim Request Domain
//!
//! This crate implements the contact-claim lifecycle: a user petitions for
//! exclusive ownership of a contact record, an administrator reviews the
//! request, and approval atomically establishes the ownership record.
//!
//! # Request Lifecycle
//!
//! ```text
//! pending -> approved   (terminal; ownership record created)
//! pending -> rejected   (terminal; includes auto-rejection on lost races)
//! ```
//!
//! The [`ClaimLedger`] owns the request collection; the [`ClaimWorkflow`]
//! coordinator combines it with the ownership registry so that a contact
//! never ends up with two owners, even when approvals race.

pub mod claim_request;
pub mod error;
pub mod ledger;
pub mod workflow;

pub use claim_request::{ClaimRequest, ClaimStatus, ReviewDecision};
pub use error::ClaimError;
pub use ledger::{ClaimCounts, ClaimFilter, ClaimLedger};
pub use workflow::{BatchOutcome, BatchReport, ClaimWorkflow, ALREADY_CLAIMED_COMMENT};
