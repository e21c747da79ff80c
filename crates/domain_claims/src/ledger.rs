//! Claim request ledger
//!
//! Owns the claim request collection: creation, lookup, filtered listing,
//! the single pending → terminal transition, and pending-only deletion.
//! Mutations hold the ledger mutex across the in-memory change and the
//! snapshot write; a failed persist is rolled back before the error is
//! returned.
//!
//! The ledger deliberately does not enforce "one active claim per contact";
//! that check belongs to the workflow coordinator, which evaluates it
//! jointly with ownership state.

use tokio::sync::Mutex;

use core_kernel::{ClaimRequestId, ContactId, UserId};
use infra_store::SnapshotStore;

use crate::claim_request::{ClaimRequest, ClaimStatus, ReviewDecision};
use crate::error::ClaimError;

/// Filter for ledger listings; unset fields match everything
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimFilter {
    pub status: Option<ClaimStatus>,
    pub requester_id: Option<UserId>,
    pub contact_id: Option<ContactId>,
}

impl ClaimFilter {
    fn matches(&self, request: &ClaimRequest) -> bool {
        self.status.is_none_or(|status| request.status == status)
            && self
                .requester_id
                .is_none_or(|requester| request.requester_id == requester)
            && self
                .contact_id
                .is_none_or(|contact| request.contact_id == contact)
    }
}

/// Per-status request counts for dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClaimCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ClaimCounts {
    /// Share of requests that were approved, in percent with one decimal
    pub fn approval_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.approved as f64 * 1000.0 / self.total as f64).round() / 10.0
    }
}

/// Ledger of claim requests backed by a snapshot store
pub struct ClaimLedger {
    store: SnapshotStore<ClaimRequest>,
    requests: Mutex<Vec<ClaimRequest>>,
}

impl ClaimLedger {
    /// Opens the ledger, loading the persisted collection
    pub async fn open(store: SnapshotStore<ClaimRequest>) -> Result<Self, ClaimError> {
        let requests = store.load().await?;
        tracing::info!(count = requests.len(), "claim ledger loaded");
        Ok(Self {
            store,
            requests: Mutex::new(requests),
        })
    }

    /// Creates and persists a new pending request
    pub async fn create(
        &self,
        requester_id: UserId,
        contact_id: ContactId,
        reason: Option<String>,
    ) -> Result<ClaimRequest, ClaimError> {
        let mut requests = self.requests.lock().await;

        let request = ClaimRequest::new(requester_id, contact_id, reason);
        requests.push(request.clone());
        if let Err(err) = self.store.save(&requests).await {
            requests.pop();
            tracing::error!(
                operation = "claim.create",
                requester_id = %requester_id,
                contact_id = %contact_id,
                error = %err,
                "failed to persist claim collection"
            );
            return Err(err.into());
        }

        Ok(request)
    }

    /// Looks up a request by id
    pub async fn find_by_id(&self, id: ClaimRequestId) -> Result<ClaimRequest, ClaimError> {
        let requests = self.requests.lock().await;
        requests
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(ClaimError::NotFound(id))
    }

    /// Requests matching the filter, in insertion order
    pub async fn list(&self, filter: &ClaimFilter) -> Vec<ClaimRequest> {
        let requests = self.requests.lock().await;
        requests
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// All requests filed by the user, in insertion order
    pub async fn list_by_requester(&self, requester_id: UserId) -> Vec<ClaimRequest> {
        self.list(&ClaimFilter {
            requester_id: Some(requester_id),
            ..ClaimFilter::default()
        })
        .await
    }

    /// All requests targeting the contact, in insertion order
    pub async fn list_by_contact(&self, contact_id: ContactId) -> Vec<ClaimRequest> {
        self.list(&ClaimFilter {
            contact_id: Some(contact_id),
            ..ClaimFilter::default()
        })
        .await
    }

    /// All requests in the given status, in insertion order
    pub async fn list_by_status(&self, status: ClaimStatus) -> Vec<ClaimRequest> {
        self.list(&ClaimFilter {
            status: Some(status),
            ..ClaimFilter::default()
        })
        .await
    }

    /// Applies a review decision to a pending request and persists it
    ///
    /// Fails with [`ClaimError::NotFound`] for an unknown id and
    /// [`ClaimError::InvalidTransition`] if the request is already terminal.
    pub async fn transition(
        &self,
        id: ClaimRequestId,
        decision: ReviewDecision,
        reviewer_id: UserId,
        comment: Option<String>,
    ) -> Result<ClaimRequest, ClaimError> {
        let mut requests = self.requests.lock().await;

        let index = requests
            .iter()
            .position(|r| r.id == id)
            .ok_or(ClaimError::NotFound(id))?;

        let mut updated = requests[index].clone();
        updated.review(decision, reviewer_id, comment)?;

        let previous = std::mem::replace(&mut requests[index], updated.clone());
        if let Err(err) = self.store.save(&requests).await {
            requests[index] = previous;
            tracing::error!(
                operation = "claim.transition",
                request_id = %id,
                decision = ?decision,
                error = %err,
                "failed to persist claim collection"
            );
            return Err(err.into());
        }

        Ok(updated)
    }

    /// Deletes a pending request
    ///
    /// Terminal requests are a permanent audit trail and fail with
    /// [`ClaimError::InvalidState`].
    pub async fn delete(&self, id: ClaimRequestId) -> Result<(), ClaimError> {
        let mut requests = self.requests.lock().await;

        let index = requests
            .iter()
            .position(|r| r.id == id)
            .ok_or(ClaimError::NotFound(id))?;

        if requests[index].status.is_terminal() {
            return Err(ClaimError::InvalidState {
                id,
                status: requests[index].status,
            });
        }

        let removed = requests.remove(index);
        if let Err(err) = self.store.save(&requests).await {
            requests.insert(index, removed);
            tracing::error!(
                operation = "claim.delete",
                request_id = %id,
                error = %err,
                "failed to persist claim collection"
            );
            return Err(err.into());
        }

        Ok(())
    }

    /// Whether the requester has a pending or approved claim on the contact
    pub async fn has_active_claim(&self, requester_id: UserId, contact_id: ContactId) -> bool {
        let requests = self.requests.lock().await;
        requests
            .iter()
            .any(|r| r.requester_id == requester_id && r.contact_id == contact_id && r.is_active())
    }

    /// Per-status counts over the whole ledger
    pub async fn counts(&self) -> ClaimCounts {
        let requests = self.requests.lock().await;
        let mut counts = ClaimCounts {
            total: requests.len(),
            ..ClaimCounts::default()
        };
        for request in requests.iter() {
            match request.status {
                ClaimStatus::Pending => counts.pending += 1,
                ClaimStatus::Approved => counts.approved += 1,
                ClaimStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}
