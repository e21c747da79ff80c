//! Ownership aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ContactId, OwnershipId, UserId};

/// The durable fact that a specific user controls a specific contact record
///
/// At most one ownership record may exist per contact at any time; the
/// registry enforces that invariant at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    /// Unique identifier
    pub id: OwnershipId,
    /// The owned contact
    pub contact_id: ContactId,
    /// The owning user
    pub user_id: UserId,
    /// When the ownership was established
    pub claimed_at: DateTime<Utc>,
}

impl Ownership {
    /// Creates a new ownership record stamped with the current time
    pub fn new(contact_id: ContactId, user_id: UserId) -> Self {
        Self {
            id: OwnershipId::new_v7(),
            contact_id,
            user_id,
            claimed_at: Utc::now(),
        }
    }
}
