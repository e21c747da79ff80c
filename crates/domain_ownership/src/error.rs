//! Ownership domain errors

use thiserror::Error;

use core_kernel::{ContactId, UserId};
use infra_store::StorageError;

/// Errors that can occur in the ownership domain
#[derive(Debug, Error)]
pub enum OwnershipError {
    /// The contact already has an owner (any user counts)
    #[error("contact {0} already has an owner")]
    AlreadyOwned(ContactId),

    /// No ownership record matches the (contact, user) pair exactly
    #[error("no ownership found for contact {contact_id} and user {user_id}")]
    NotFound {
        contact_id: ContactId,
        user_id: UserId,
    },

    /// The snapshot could not be persisted; the mutation was rolled back
    #[error(transparent)]
    Storage(#[from] StorageError),
}
