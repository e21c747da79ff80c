//! User-facing claim handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::ClaimRequestId;
use domain_claims::{ClaimFilter, ClaimStatus};

use crate::auth::AuthUser;
use crate::dto::claims::*;
use crate::dto::common::paginate_claims;
use crate::dto::ownership::{OwnedContactsResponse, OwnershipResponse};
use crate::error::ApiError;
use crate::AppState;

/// Submits a claim on a contact for the authenticated user
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    payload.validate()?;

    let reason = payload.reason.filter(|r| !r.trim().is_empty());
    let request = state
        .workflow
        .submit(user.id, payload.contact_id, reason)
        .await?;

    Ok((StatusCode::CREATED, Json(request.into())))
}

/// The authenticated user's claim history, newest first
pub async fn list_my_claims(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ClaimHistoryQuery>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    let filter = ClaimFilter {
        status: query.status,
        requester_id: Some(user.id),
        ..ClaimFilter::default()
    };
    let claims = state.ledger.list(&filter).await;
    let (page, pagination) = paginate_claims(claims, query.page, query.per_page);

    Ok(Json(ClaimListResponse {
        claims: page.into_iter().map(ClaimResponse::from).collect(),
        pagination,
    }))
}

/// Revokes the authenticated user's own pending claim
pub async fn revoke_claim(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(request_id): Path<ClaimRequestId>,
) -> Result<StatusCode, ApiError> {
    state.workflow.revoke(request_id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Contacts owned by the authenticated user
pub async fn my_contacts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<OwnedContactsResponse>, ApiError> {
    let ownerships = state.registry.list_by_user(user.id).await;
    let count = ownerships.len();

    Ok(Json(OwnedContactsResponse {
        contacts: ownerships.into_iter().map(OwnershipResponse::from).collect(),
        count,
    }))
}

/// Claim and ownership statistics for the authenticated user
pub async fn my_stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserStatsResponse>, ApiError> {
    let owned = state.registry.list_by_user(user.id).await;
    let claims = state.ledger.list_by_requester(user.id).await;

    let total = claims.len();
    let pending = claims
        .iter()
        .filter(|c| c.status == ClaimStatus::Pending)
        .count();
    let approved = claims
        .iter()
        .filter(|c| c.status == ClaimStatus::Approved)
        .count();
    let rejected = total - pending - approved;
    let approval_rate = if total == 0 {
        0.0
    } else {
        (approved as f64 * 1000.0 / total as f64).round() / 10.0
    };

    Ok(Json(UserStatsResponse {
        owned_contacts: owned.len(),
        total_claims: total,
        pending_claims: pending,
        approved_claims: approved,
        rejected_claims: rejected,
        claim_approval_rate: approval_rate,
    }))
}
