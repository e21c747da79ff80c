//! Test data builders
//!
//! Builders for raw persisted records, used to seed snapshot files and for
//! round-trip tests. Tests that exercise the live services should go
//! through the ledger/registry/workflow instead.

use chrono::{DateTime, Utc};

use core_kernel::{ClaimRequestId, ContactId, OwnershipId, UserId};
use domain_claims::{ClaimRequest, ClaimStatus};
use domain_ownership::Ownership;

use crate::fixtures::{IdFixtures, TemporalFixtures};

/// Builder for raw claim request records
pub struct TestClaimRequestBuilder {
    requester_id: UserId,
    contact_id: ContactId,
    reason: Option<String>,
    status: ClaimStatus,
    reviewer_id: Option<UserId>,
    reviewer_comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl Default for TestClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimRequestBuilder {
    /// Creates a builder for a pending request from Alice on contact X
    pub fn new() -> Self {
        Self {
            requester_id: IdFixtures::alice(),
            contact_id: IdFixtures::contact_x(),
            reason: None,
            status: ClaimStatus::Pending,
            reviewer_id: None,
            reviewer_comment: None,
            created_at: TemporalFixtures::submitted_at(),
        }
    }

    pub fn with_requester(mut self, requester_id: UserId) -> Self {
        self.requester_id = requester_id;
        self
    }

    pub fn with_contact(mut self, contact_id: ContactId) -> Self {
        self.contact_id = contact_id;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Marks the record as reviewed by the admin fixture
    pub fn reviewed(mut self, status: ClaimStatus, comment: Option<&str>) -> Self {
        self.status = status;
        self.reviewer_id = Some(IdFixtures::admin());
        self.reviewer_comment = comment.map(str::to_string);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> ClaimRequest {
        let updated_at = if self.status == ClaimStatus::Pending {
            self.created_at
        } else {
            TemporalFixtures::reviewed_at()
        };
        ClaimRequest {
            id: ClaimRequestId::new_v7(),
            requester_id: self.requester_id,
            contact_id: self.contact_id,
            reason: self.reason,
            status: self.status,
            reviewer_id: self.reviewer_id,
            reviewer_comment: self.reviewer_comment,
            created_at: self.created_at,
            updated_at,
        }
    }
}

/// Builder for raw ownership records
pub struct TestOwnershipBuilder {
    contact_id: ContactId,
    user_id: UserId,
    claimed_at: DateTime<Utc>,
}

impl Default for TestOwnershipBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOwnershipBuilder {
    /// Creates a builder for Alice owning contact X
    pub fn new() -> Self {
        Self {
            contact_id: IdFixtures::contact_x(),
            user_id: IdFixtures::alice(),
            claimed_at: TemporalFixtures::reviewed_at(),
        }
    }

    pub fn with_contact(mut self, contact_id: ContactId) -> Self {
        self.contact_id = contact_id;
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_claimed_at(mut self, claimed_at: DateTime<Utc>) -> Self {
        self.claimed_at = claimed_at;
        self
    }

    pub fn build(self) -> Ownership {
        Ownership {
            id: OwnershipId::new_v7(),
            contact_id: self.contact_id,
            user_id: self.user_id,
            claimed_at: self.claimed_at,
        }
    }
}
