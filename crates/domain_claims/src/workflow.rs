//! Claim workflow coordinator
//!
//! Orchestrates the claim ledger and the ownership registry to implement
//! submit, approve, reject, batch review, and self-revocation. The
//! registry's `create` is the authoritative uniqueness check: approval
//! attempts it first and only then flips the ledger status, so a crash
//! between the two writes leaves an ownership record whose request still
//! reads pending (operator-reconcilable) rather than an approved request
//! without ownership.

use std::sync::Arc;

use core_kernel::{ClaimRequestId, ContactId, UserId};
use domain_ownership::{OwnershipError, OwnershipRegistry};

use crate::claim_request::{ClaimRequest, ReviewDecision};
use crate::error::ClaimError;
use crate::ledger::ClaimLedger;

/// Comment recorded on a request that is auto-rejected because another
/// request for the same contact was approved first
pub const ALREADY_CLAIMED_COMMENT: &str = "contact already claimed by another user";

/// Per-request outcome of a batch review
#[derive(Debug)]
pub struct BatchOutcome {
    pub request_id: ClaimRequestId,
    pub result: Result<ClaimRequest, ClaimError>,
}

/// Result of a batch review; items succeed and fail independently
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    fn from_outcomes(outcomes: Vec<BatchOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.result.is_ok()).count();
        let failed = outcomes.len() - succeeded;
        Self {
            outcomes,
            succeeded,
            failed,
        }
    }

    /// Total number of requests processed
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Coordinator for the claim/ownership workflow
///
/// Constructed once at startup and shared by reference; there are no
/// process-wide singletons.
pub struct ClaimWorkflow {
    ledger: Arc<ClaimLedger>,
    registry: Arc<OwnershipRegistry>,
}

impl ClaimWorkflow {
    pub fn new(ledger: Arc<ClaimLedger>, registry: Arc<OwnershipRegistry>) -> Self {
        Self { ledger, registry }
    }

    /// Submits a new claim for review
    ///
    /// The duplicate and already-owned pre-checks are advisory: a racing
    /// submission can slip past them, and approval re-validates against the
    /// registry authoritatively. Rejecting up front merely avoids creating
    /// doomed requests.
    pub async fn submit(
        &self,
        requester_id: UserId,
        contact_id: ContactId,
        reason: Option<String>,
    ) -> Result<ClaimRequest, ClaimError> {
        if self.ledger.has_active_claim(requester_id, contact_id).await {
            return Err(ClaimError::DuplicateClaim {
                requester_id,
                contact_id,
            });
        }
        if self.registry.is_claimed(contact_id).await {
            return Err(ClaimError::ContactAlreadyOwned(contact_id));
        }
        self.ledger.create(requester_id, contact_id, reason).await
    }

    /// Approves a pending request, creating the ownership record
    ///
    /// If the registry reports the contact as already owned — another
    /// request for the same contact won the race — the request is not left
    /// pending: it is auto-rejected with [`ALREADY_CLAIMED_COMMENT`] and the
    /// call returns [`ClaimError::ContactAlreadyOwned`].
    pub async fn approve(
        &self,
        request_id: ClaimRequestId,
        reviewer_id: UserId,
        comment: Option<String>,
    ) -> Result<ClaimRequest, ClaimError> {
        let request = self.ledger.find_by_id(request_id).await?;
        if request.status.is_terminal() {
            return Err(ClaimError::InvalidTransition {
                id: request_id,
                status: request.status,
            });
        }

        match self
            .registry
            .create(request.contact_id, request.requester_id)
            .await
        {
            Ok(_ownership) => {
                // Ownership is durable at this point; the ledger flip comes
                // second so a crash here never produces an approved request
                // without ownership.
                self.ledger
                    .transition(request_id, ReviewDecision::Approve, reviewer_id, comment)
                    .await
                    .inspect_err(|err| {
                        tracing::error!(
                            request_id = %request_id,
                            contact_id = %request.contact_id,
                            requester_id = %request.requester_id,
                            error = %err,
                            "ownership created but request transition failed"
                        );
                    })
            }
            Err(OwnershipError::AlreadyOwned(contact_id)) => {
                // Retire the loser so it does not linger in the review
                // queue. A terminal request here means the race was on this
                // very id; surface that as InvalidTransition instead.
                self.ledger
                    .transition(
                        request_id,
                        ReviewDecision::Reject,
                        reviewer_id,
                        Some(ALREADY_CLAIMED_COMMENT.to_string()),
                    )
                    .await?;
                Err(ClaimError::ContactAlreadyOwned(contact_id))
            }
            Err(OwnershipError::Storage(err)) => Err(ClaimError::Storage(err)),
            Err(OwnershipError::NotFound { .. }) => {
                unreachable!("ownership create does not report NotFound")
            }
        }
    }

    /// Rejects a pending request; no ownership side effect
    pub async fn reject(
        &self,
        request_id: ClaimRequestId,
        reviewer_id: UserId,
        comment: Option<String>,
    ) -> Result<ClaimRequest, ClaimError> {
        self.ledger
            .transition(request_id, ReviewDecision::Reject, reviewer_id, comment)
            .await
    }

    /// Approves each request independently; see [`BatchReport`]
    pub async fn batch_approve(
        &self,
        request_ids: &[ClaimRequestId],
        reviewer_id: UserId,
        comment: Option<&str>,
    ) -> BatchReport {
        self.review_batch(request_ids, reviewer_id, comment, ReviewDecision::Approve)
            .await
    }

    /// Rejects each request independently; see [`BatchReport`]
    pub async fn batch_reject(
        &self,
        request_ids: &[ClaimRequestId],
        reviewer_id: UserId,
        comment: Option<&str>,
    ) -> BatchReport {
        self.review_batch(request_ids, reviewer_id, comment, ReviewDecision::Reject)
            .await
    }

    /// Self-service cancellation of a pending request
    pub async fn revoke(
        &self,
        request_id: ClaimRequestId,
        requester_id: UserId,
    ) -> Result<(), ClaimError> {
        let request = self.ledger.find_by_id(request_id).await?;
        if request.requester_id != requester_id {
            return Err(ClaimError::RequesterMismatch {
                id: request_id,
                user_id: requester_id,
            });
        }
        if request.status.is_terminal() {
            return Err(ClaimError::InvalidState {
                id: request_id,
                status: request.status,
            });
        }
        self.ledger.delete(request_id).await
    }

    // Items run sequentially so the registry's linearization point is never
    // contended against itself inside one batch call.
    async fn review_batch(
        &self,
        request_ids: &[ClaimRequestId],
        reviewer_id: UserId,
        comment: Option<&str>,
        decision: ReviewDecision,
    ) -> BatchReport {
        let mut outcomes = Vec::with_capacity(request_ids.len());
        for &request_id in request_ids {
            let comment = comment.map(str::to_string);
            let result = match decision {
                ReviewDecision::Approve => self.approve(request_id, reviewer_id, comment).await,
                ReviewDecision::Reject => self.reject(request_id, reviewer_id, comment).await,
            };
            outcomes.push(BatchOutcome { request_id, result });
        }
        BatchReport::from_outcomes(outcomes)
    }
}
