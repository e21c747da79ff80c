//! Ownership DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ContactId, OwnershipId, UserId};
use domain_ownership::{ImportReport, Ownership};

use crate::dto::common::BatchSummary;
use crate::error::ownership_error_code;

#[derive(Debug, Serialize)]
pub struct OwnershipResponse {
    pub id: OwnershipId,
    pub contact_id: ContactId,
    pub user_id: UserId,
    pub claimed_at: DateTime<Utc>,
}

impl From<Ownership> for OwnershipResponse {
    fn from(ownership: Ownership) -> Self {
        Self {
            id: ownership.id,
            contact_id: ownership.contact_id,
            user_id: ownership.user_id,
            claimed_at: ownership.claimed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OwnedContactsResponse {
    pub contacts: Vec<OwnershipResponse>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignOwnershipRequest {
    pub contact_id: ContactId,
    pub user_id: UserId,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BatchAssignRequest {
    #[validate(length(min = 1, max = 500))]
    pub assignments: Vec<AssignOwnershipRequest>,
}

#[derive(Debug, Serialize)]
pub struct AssignResultRow {
    pub contact_id: ContactId,
    pub user_id: UserId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchAssignResponse {
    pub results: Vec<AssignResultRow>,
    pub summary: BatchSummary,
}

impl From<ImportReport> for BatchAssignResponse {
    fn from(report: ImportReport) -> Self {
        let summary = BatchSummary {
            total: report.total(),
            succeeded: report.created,
            failed: report.failed,
        };
        let results = report
            .rows
            .into_iter()
            .map(|row| match row.result {
                Ok(_) => AssignResultRow {
                    contact_id: row.contact_id,
                    user_id: row.user_id,
                    success: true,
                    code: None,
                    error: None,
                },
                Err(err) => AssignResultRow {
                    contact_id: row.contact_id,
                    user_id: row.user_id,
                    success: false,
                    code: Some(ownership_error_code(&err)),
                    error: Some(err.to_string()),
                },
            })
            .collect();
        Self { results, summary }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransferOwnershipRequest {
    pub from_user_id: UserId,
    pub to_user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct UnassignOwnershipRequest {
    pub user_id: UserId,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UnclaimedContactsRequest {
    #[validate(length(min = 1, max = 1000))]
    pub contact_ids: Vec<ContactId>,
}

#[derive(Debug, Serialize)]
pub struct UnclaimedContactsResponse {
    pub contact_ids: Vec<ContactId>,
    pub count: usize,
}
