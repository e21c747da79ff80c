//! API middleware
//!
//! The access guard lives here: bearer authentication resolves the
//! principal, `require_admin` gates the administrative surface, and
//! `require_contact_access` grants contact-scoped routes to the admin role
//! or the contact's owner (a pure read against the ownership registry).

use axum::{
    body::Body,
    extract::{Path, State},
    http::Request,
    middleware::Next,
    response::Response,
    Extension,
};
use chrono::Utc;
use tracing::{info, warn};

use core_kernel::ContactId;

use crate::auth::{validate_token, AuthUser};
use crate::error::ApiError;
use crate::AppState;

/// Authentication middleware
///
/// Validates the bearer token and attaches the resolved [`AuthUser`] to the
/// request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            warn!("missing or invalid Authorization header");
            return Err(ApiError::unauthorized("no_token"));
        }
    };

    let claims = validate_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!(error = %e, "token validation failed");
        ApiError::from(e)
    })?;
    let user = AuthUser::from_claims(&claims)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Requires the admin role
pub async fn require_admin(
    Extension(user): Extension<AuthUser>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if !user.is_admin {
        return Err(ApiError::forbidden(
            "admin_required",
            "administrator role required",
        ));
    }
    Ok(next.run(request).await)
}

/// Requires ownership of the contact named in the path, or the admin role
pub async fn require_contact_access(
    State(state): State<AppState>,
    Path(contact_id): Path<ContactId>,
    Extension(user): Extension<AuthUser>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if user.is_admin || state.registry.has_ownership(contact_id, user.id).await {
        Ok(next.run(request).await)
    } else {
        Err(ApiError::forbidden(
            "no_contact_permission",
            "you do not own this contact",
        ))
    }
}

/// Audit logging middleware
///
/// Logs all API requests for the admin audit trail and debugging
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request
        .extensions()
        .get::<AuthUser>()
        .map(|u| u.id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
