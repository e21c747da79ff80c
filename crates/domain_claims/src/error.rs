//! Claim domain errors

use thiserror::Error;

use core_kernel::{ClaimRequestId, ContactId, UserId};
use infra_store::StorageError;

use crate::claim_request::ClaimStatus;

/// Errors that can occur in the claim domain
///
/// Everything except `Storage` is an expected, recoverable-by-the-caller
/// condition; the API layer maps those to 4xx responses and never logs them
/// as alerting events.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Unknown request id
    #[error("claim request {0} not found")]
    NotFound(ClaimRequestId),

    /// A review was attempted on a terminal request
    #[error("claim request {id} is {status}; only pending requests can be reviewed")]
    InvalidTransition {
        id: ClaimRequestId,
        status: ClaimStatus,
    },

    /// A delete was attempted on a terminal request
    #[error("claim request {id} is {status}; only pending requests can be deleted")]
    InvalidState {
        id: ClaimRequestId,
        status: ClaimStatus,
    },

    /// The requester already has a pending or approved claim on the contact
    #[error("user {requester_id} already has an active claim on contact {contact_id}")]
    DuplicateClaim {
        requester_id: UserId,
        contact_id: ContactId,
    },

    /// The contact already has an owner
    #[error("contact {0} is already claimed by another user")]
    ContactAlreadyOwned(ContactId),

    /// A revocation was attempted by someone other than the requester
    #[error("claim request {id} does not belong to user {user_id}")]
    RequesterMismatch {
        id: ClaimRequestId,
        user_id: UserId,
    },

    /// The snapshot could not be persisted; the mutation was rolled back
    #[error(transparent)]
    Storage(#[from] StorageError),
}
