//! Claim request aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimRequestId, ContactId, UserId};

use crate::error::ClaimError;

/// Claim request status
///
/// `Pending` is the only non-terminal state; the two review outcomes are
/// terminal and never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Awaiting review
    Pending,
    /// Approved; an ownership record was created
    Approved,
    /// Rejected by a reviewer or auto-rejected on a lost ownership race
    Rejected,
}

impl ClaimStatus {
    /// Whether the status permits no further transition
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// The two review outcomes a pending request can transition to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    /// The terminal status this decision produces
    pub fn target_status(self) -> ClaimStatus {
        match self {
            ReviewDecision::Approve => ClaimStatus::Approved,
            ReviewDecision::Reject => ClaimStatus::Rejected,
        }
    }
}

/// A user's petition to become the recorded owner of a contact
///
/// Everything except the review fields is immutable after submission. The
/// review fields (`status`, `reviewer_id`, `reviewer_comment`, `updated_at`)
/// change exactly once, at the pending → approved/rejected transition, and
/// the record is then retained indefinitely as an audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Unique identifier
    pub id: ClaimRequestId,
    /// User who filed the claim
    pub requester_id: UserId,
    /// Target contact record
    pub contact_id: ContactId,
    /// Optional free-text justification, immutable once submitted
    pub reason: Option<String>,
    /// Current status
    pub status: ClaimStatus,
    /// Reviewer who decided the request; `None` while pending
    pub reviewer_id: Option<UserId>,
    /// Optional comment recorded at review time
    pub reviewer_comment: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp, refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl ClaimRequest {
    /// Creates a new pending request
    pub fn new(requester_id: UserId, contact_id: ContactId, reason: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ClaimRequestId::new_v7(),
            requester_id,
            contact_id,
            reason,
            status: ClaimStatus::Pending,
            reviewer_id: None,
            reviewer_comment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a review decision
    ///
    /// Fails with [`ClaimError::InvalidTransition`] if the request is
    /// already terminal.
    pub(crate) fn review(
        &mut self,
        decision: ReviewDecision,
        reviewer_id: UserId,
        comment: Option<String>,
    ) -> Result<(), ClaimError> {
        if self.status.is_terminal() {
            return Err(ClaimError::InvalidTransition {
                id: self.id,
                status: self.status,
            });
        }
        self.status = decision.target_status();
        self.reviewer_id = Some(reviewer_id);
        self.reviewer_comment = comment;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether the request still counts against "one active claim per
    /// contact" (pending or approved)
    pub fn is_active(&self) -> bool {
        matches!(self.status, ClaimStatus::Pending | ClaimStatus::Approved)
    }
}
