//! Administrative handlers
//!
//! Every route here sits behind `require_admin`. Review decisions go
//! through the workflow coordinator; direct ownership management talks to
//! the registry.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{ClaimRequestId, ContactId};
use domain_claims::{ClaimFilter, ClaimStatus};

use crate::auth::AuthUser;
use crate::dto::claims::*;
use crate::dto::common::paginate_claims;
use crate::dto::ownership::*;
use crate::error::ApiError;
use crate::AppState;

/// All claim requests, filterable by status/requester/contact
pub async fn list_claims(
    State(state): State<AppState>,
    Query(query): Query<AdminClaimQuery>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    let filter = ClaimFilter {
        status: query.status,
        requester_id: query.requester_id,
        contact_id: query.contact_id,
    };
    let claims = state.ledger.list(&filter).await;
    let (page, pagination) = paginate_claims(claims, query.page, query.per_page);

    Ok(Json(ClaimListResponse {
        claims: page.into_iter().map(ClaimResponse::from).collect(),
        pagination,
    }))
}

/// The pending review queue
pub async fn pending_claims(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    let claims = state.ledger.list_by_status(ClaimStatus::Pending).await;
    let (page, pagination) = paginate_claims(claims, query.page, query.per_page);

    Ok(Json(ClaimListResponse {
        claims: page.into_iter().map(ClaimResponse::from).collect(),
        pagination,
    }))
}

/// Approves a pending claim, creating the ownership record
pub async fn approve_claim(
    State(state): State<AppState>,
    Extension(reviewer): Extension<AuthUser>,
    Path(request_id): Path<ClaimRequestId>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    payload.validate()?;

    let approved = state
        .workflow
        .approve(request_id, reviewer.id, payload.comment)
        .await?;

    Ok(Json(approved.into()))
}

/// Rejects a pending claim
pub async fn reject_claim(
    State(state): State<AppState>,
    Extension(reviewer): Extension<AuthUser>,
    Path(request_id): Path<ClaimRequestId>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    payload.validate()?;

    let rejected = state
        .workflow
        .reject(request_id, reviewer.id, payload.comment)
        .await?;

    Ok(Json(rejected.into()))
}

/// Batch approve/reject; per-item outcomes, never fails outright
pub async fn batch_review(
    State(state): State<AppState>,
    Extension(reviewer): Extension<AuthUser>,
    Json(payload): Json<BatchReviewRequest>,
) -> Result<Json<BatchReviewResponse>, ApiError> {
    payload.validate()?;

    let comment = payload.comment.as_deref();
    let report = match payload.action {
        BatchAction::Approve => {
            state
                .workflow
                .batch_approve(&payload.request_ids, reviewer.id, comment)
                .await
        }
        BatchAction::Reject => {
            state
                .workflow
                .batch_reject(&payload.request_ids, reviewer.id, comment)
                .await
        }
    };

    Ok(Json(report.into()))
}

/// Directly assigns ownership of a contact, bypassing the claim workflow
pub async fn assign_ownership(
    State(state): State<AppState>,
    Json(payload): Json<AssignOwnershipRequest>,
) -> Result<(StatusCode, Json<OwnershipResponse>), ApiError> {
    let ownership = state
        .registry
        .create(payload.contact_id, payload.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ownership.into())))
}

/// Batch import of ownership assignments
pub async fn batch_assign(
    State(state): State<AppState>,
    Json(payload): Json<BatchAssignRequest>,
) -> Result<Json<BatchAssignResponse>, ApiError> {
    payload.validate()?;

    let assignments: Vec<_> = payload
        .assignments
        .iter()
        .map(|a| (a.contact_id, a.user_id))
        .collect();
    let report = state.registry.create_batch(&assignments).await;

    Ok(Json(report.into()))
}

/// Transfers ownership of a contact between users
pub async fn transfer_ownership(
    State(state): State<AppState>,
    Path(contact_id): Path<ContactId>,
    Json(payload): Json<TransferOwnershipRequest>,
) -> Result<Json<OwnershipResponse>, ApiError> {
    let ownership = state
        .registry
        .transfer(contact_id, payload.from_user_id, payload.to_user_id)
        .await?;

    Ok(Json(ownership.into()))
}

/// Removes an ownership record
pub async fn unassign_ownership(
    State(state): State<AppState>,
    Path(contact_id): Path<ContactId>,
    Json(payload): Json<UnassignOwnershipRequest>,
) -> Result<StatusCode, ApiError> {
    state.registry.delete(contact_id, payload.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// System-wide claim and ownership counts for the dashboard
pub async fn admin_stats(
    State(state): State<AppState>,
) -> Result<Json<AdminStatsResponse>, ApiError> {
    let counts = state.ledger.counts().await;
    let total_ownerships = state.registry.list_all().await.len();
    let claimed_contacts = state.registry.claimed_contact_count().await;

    Ok(Json(AdminStatsResponse {
        total_claims: counts.total,
        pending_claims: counts.pending,
        approved_claims: counts.approved,
        rejected_claims: counts.rejected,
        total_ownerships,
        claimed_contacts,
        claim_approval_rate: counts.approval_rate(),
    }))
}
