//! API error handling
//!
//! Every error response carries a machine-readable `error` code alongside
//! the human-readable message. Domain errors map to 4xx responses and are
//! not logged as alerting events; storage failures map to 500 and were
//! already logged with operation context where they occurred.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_claims::ClaimError;
use domain_ownership::OwnershipError;

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { code: &'static str, message: String },

    #[error("{message}")]
    BadRequest { code: &'static str, message: String },

    #[error("unauthorized")]
    Unauthorized { code: &'static str },

    #[error("{message}")]
    Forbidden { code: &'static str, message: String },

    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Internal { code: &'static str, message: String },
}

impl ApiError {
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str) -> Self {
        ApiError::Unauthorized { code }
    }

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Forbidden {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Internal {
            code,
            message: message.into(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound { code, message } => (StatusCode::NOT_FOUND, *code, message.clone()),
            ApiError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, *code, message.clone())
            }
            ApiError::Unauthorized { code } => {
                (StatusCode::UNAUTHORIZED, *code, "unauthorized".to_string())
            }
            ApiError::Forbidden { code, message } => {
                (StatusCode::FORBIDDEN, *code, message.clone())
            }
            ApiError::Conflict { code, message } => (StatusCode::CONFLICT, *code, message.clone()),
            ApiError::Validation { message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message.clone(),
            ),
            ApiError::Internal { code, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, *code, message.clone())
            }
        };

        let body = ErrorResponse {
            error: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Machine-readable code for a claim domain error
pub fn claim_error_code(err: &ClaimError) -> &'static str {
    match err {
        ClaimError::NotFound(_) => "claim_not_found",
        ClaimError::InvalidTransition { .. } => "claim_already_processed",
        ClaimError::InvalidState { .. } => "claim_not_pending",
        ClaimError::DuplicateClaim { .. } => "duplicate_claim",
        ClaimError::ContactAlreadyOwned(_) => "contact_already_claimed",
        ClaimError::RequesterMismatch { .. } => "not_your_claim",
        ClaimError::Storage(_) => "storage_error",
    }
}

/// Machine-readable code for an ownership domain error
pub fn ownership_error_code(err: &OwnershipError) -> &'static str {
    match err {
        OwnershipError::AlreadyOwned(_) => "contact_already_claimed",
        OwnershipError::NotFound { .. } => "ownership_not_found",
        OwnershipError::Storage(_) => "storage_error",
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        let code = claim_error_code(&err);
        let message = err.to_string();
        match err {
            ClaimError::NotFound(_) => ApiError::not_found(code, message),
            ClaimError::InvalidTransition { .. } | ClaimError::InvalidState { .. } => {
                ApiError::conflict(code, message)
            }
            ClaimError::DuplicateClaim { .. } | ClaimError::ContactAlreadyOwned(_) => {
                ApiError::conflict(code, message)
            }
            ClaimError::RequesterMismatch { .. } => ApiError::forbidden(code, message),
            ClaimError::Storage(_) => ApiError::internal(code, message),
        }
    }
}

impl From<OwnershipError> for ApiError {
    fn from(err: OwnershipError) -> Self {
        let code = ownership_error_code(&err);
        let message = err.to_string();
        match err {
            OwnershipError::AlreadyOwned(_) => ApiError::conflict(code, message),
            OwnershipError::NotFound { .. } => ApiError::not_found(code, message),
            OwnershipError::Storage(_) => ApiError::internal(code, message),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => ApiError::unauthorized("invalid_token"),
            AuthError::TokenExpired => ApiError::unauthorized("token_expired"),
            AuthError::InvalidPrincipal => ApiError::unauthorized("invalid_principal"),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation {
            message: err.to_string(),
        }
    }
}
