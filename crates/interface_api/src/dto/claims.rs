//! Claim DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimRequestId, ContactId, UserId};
use domain_claims::{BatchReport, ClaimRequest, ClaimStatus};

use crate::dto::common::{default_page, default_per_page, BatchSummary, Pagination};
use crate::error::claim_error_code;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitClaimRequest {
    pub contact_id: ContactId,
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClaimHistoryQuery {
    pub status: Option<ClaimStatus>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

#[derive(Debug, Deserialize)]
pub struct AdminClaimQuery {
    pub status: Option<ClaimStatus>,
    pub requester_id: Option<UserId>,
    pub contact_id: Option<ContactId>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchAction {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BatchReviewRequest {
    pub action: BatchAction,
    #[validate(length(min = 1, max = 100))]
    pub request_ids: Vec<ClaimRequestId>,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: ClaimRequestId,
    pub requester_id: UserId,
    pub contact_id: ContactId,
    pub reason: Option<String>,
    pub status: ClaimStatus,
    pub reviewer_id: Option<UserId>,
    pub reviewer_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClaimRequest> for ClaimResponse {
    fn from(request: ClaimRequest) -> Self {
        Self {
            id: request.id,
            requester_id: request.requester_id,
            contact_id: request.contact_id,
            reason: request.reason,
            status: request.status,
            reviewer_id: request.reviewer_id,
            reviewer_comment: request.reviewer_comment,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub claims: Vec<ClaimResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct BatchResultRow {
    pub request_id: ClaimRequestId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchReviewResponse {
    pub results: Vec<BatchResultRow>,
    pub summary: BatchSummary,
}

impl From<BatchReport> for BatchReviewResponse {
    fn from(report: BatchReport) -> Self {
        let summary = BatchSummary {
            total: report.total(),
            succeeded: report.succeeded,
            failed: report.failed,
        };
        let results = report
            .outcomes
            .into_iter()
            .map(|outcome| match outcome.result {
                Ok(_) => BatchResultRow {
                    request_id: outcome.request_id,
                    success: true,
                    code: None,
                    error: None,
                },
                Err(err) => BatchResultRow {
                    request_id: outcome.request_id,
                    success: false,
                    code: Some(claim_error_code(&err)),
                    error: Some(err.to_string()),
                },
            })
            .collect();
        Self { results, summary }
    }
}

#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub owned_contacts: usize,
    pub total_claims: usize,
    pub pending_claims: usize,
    pub approved_claims: usize,
    pub rejected_claims: usize,
    pub claim_approval_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct AdminStatsResponse {
    pub total_claims: usize,
    pub pending_claims: usize,
    pub approved_claims: usize,
    pub rejected_claims: usize,
    pub total_ownerships: usize,
    pub claimed_contacts: usize,
    pub claim_approval_rate: f64,
}
