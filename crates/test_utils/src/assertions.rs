//! Custom test assertions
//!
//! Domain assertions with error messages that name the entities involved.

use core_kernel::{ClaimRequestId, ContactId, UserId};
use domain_claims::{ClaimLedger, ClaimStatus};
use domain_ownership::OwnershipRegistry;

/// Asserts that exactly one ownership record exists for the contact and
/// that it belongs to `expected_owner`
pub async fn assert_sole_owner(
    registry: &OwnershipRegistry,
    contact_id: ContactId,
    expected_owner: UserId,
) {
    let all = registry.list_all().await;
    let owners: Vec<UserId> = all
        .iter()
        .filter(|o| o.contact_id == contact_id)
        .map(|o| o.user_id)
        .collect();
    assert_eq!(
        owners,
        vec![expected_owner],
        "contact {} should be owned solely by {}, found owners {:?}",
        contact_id,
        expected_owner,
        owners
    );
}

/// Asserts that no ownership record exists for the contact
pub async fn assert_unowned(registry: &OwnershipRegistry, contact_id: ContactId) {
    assert!(
        !registry.is_claimed(contact_id).await,
        "contact {} should have no owner",
        contact_id
    );
}

/// Asserts the stored status of a claim request
pub async fn assert_request_status(
    ledger: &ClaimLedger,
    request_id: ClaimRequestId,
    expected: ClaimStatus,
) {
    let request = ledger
        .find_by_id(request_id)
        .await
        .unwrap_or_else(|_| panic!("claim request {} should exist", request_id));
    assert_eq!(
        request.status, expected,
        "claim request {} should be {}, found {}",
        request_id, expected, request.status
    );
}
