//! Contact-scoped handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use core_kernel::ContactId;

use crate::dto::ownership::{
    OwnershipResponse, UnclaimedContactsRequest, UnclaimedContactsResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Filters candidate contact ids down to the unclaimed ones
pub async fn unclaimed_contacts(
    State(state): State<AppState>,
    Json(payload): Json<UnclaimedContactsRequest>,
) -> Result<Json<UnclaimedContactsResponse>, ApiError> {
    payload.validate()?;

    let contact_ids = state.registry.unclaimed_among(&payload.contact_ids).await;
    let count = contact_ids.len();

    Ok(Json(UnclaimedContactsResponse { contact_ids, count }))
}

/// The ownership record of a contact; guarded by `require_contact_access`
pub async fn contact_ownership(
    State(state): State<AppState>,
    Path(contact_id): Path<ContactId>,
) -> Result<Json<OwnershipResponse>, ApiError> {
    let ownership = state
        .registry
        .find_by_contact(contact_id)
        .await
        .ok_or_else(|| {
            ApiError::not_found(
                "ownership_not_found",
                format!("contact {} has no owner", contact_id),
            )
        })?;

    Ok(Json(ownership.into()))
}
