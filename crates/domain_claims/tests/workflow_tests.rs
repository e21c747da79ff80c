//! Tests for the claim workflow coordinator
//!
//! Covers the submit/approve/reject/revoke state machine, the best-effort
//! batch policy, and the single-owner guarantee under racing approvals.

use std::sync::Arc;

use core_kernel::{ClaimRequestId, ContactId, UserId};
use domain_claims::{ClaimError, ClaimStatus, ALREADY_CLAIMED_COMMENT};
use test_utils::{
    assert_request_status, assert_sole_owner, assert_unowned, IdFixtures, TestStores,
};

// ============================================================================
// Submit Tests
// ============================================================================

mod submit_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_creates_pending_request() {
        let stores = TestStores::new();
        let (ledger, registry, workflow) = stores.workflow().await;

        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), Some("mine".to_string()))
            .await
            .unwrap();

        assert_eq!(request.status, ClaimStatus::Pending);
        assert_request_status(&ledger, request.id, ClaimStatus::Pending).await;
        assert_unowned(&registry, IdFixtures::contact_x()).await;
    }

    #[tokio::test]
    async fn test_submit_rejects_duplicate_pending_claim() {
        let stores = TestStores::new();
        let (_ledger, _registry, workflow) = stores.workflow().await;

        workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
        let err = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::DuplicateClaim { .. }));
    }

    #[tokio::test]
    async fn test_submit_allows_second_requester_for_same_contact() {
        let stores = TestStores::new();
        let (_ledger, _registry, workflow) = stores.workflow().await;

        workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
        // A different user's competing claim is allowed while unowned; the
        // race is settled at approval time
        workflow
            .submit(IdFixtures::bob(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_submit_rejects_owned_contact() {
        let stores = TestStores::new();
        let (_ledger, registry, workflow) = stores.workflow().await;

        registry
            .create(IdFixtures::contact_x(), IdFixtures::bob())
            .await
            .unwrap();

        let err = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::ContactAlreadyOwned(_)));
    }

    #[tokio::test]
    async fn test_submit_allowed_again_after_rejection() {
        let stores = TestStores::new();
        let (_ledger, _registry, workflow) = stores.workflow().await;

        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
        workflow
            .reject(request.id, IdFixtures::admin(), None)
            .await
            .unwrap();

        workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
    }
}

// ============================================================================
// Approve Tests
// ============================================================================

mod approve_tests {
    use super::*;

    #[tokio::test]
    async fn test_approve_creates_ownership_and_flips_status() {
        let stores = TestStores::new();
        let (ledger, registry, workflow) = stores.workflow().await;

        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
        let approved = workflow
            .approve(request.id, IdFixtures::admin(), Some("checked".to_string()))
            .await
            .unwrap();

        assert_eq!(approved.status, ClaimStatus::Approved);
        assert_eq!(approved.reviewer_id, Some(IdFixtures::admin()));
        assert_eq!(approved.reviewer_comment.as_deref(), Some("checked"));
        assert_request_status(&ledger, request.id, ClaimStatus::Approved).await;
        assert_sole_owner(&registry, IdFixtures::contact_x(), IdFixtures::alice()).await;
    }

    #[tokio::test]
    async fn test_second_approve_of_same_request_fails_without_side_effects() {
        let stores = TestStores::new();
        let (_ledger, registry, workflow) = stores.workflow().await;

        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
        workflow
            .approve(request.id, IdFixtures::admin(), None)
            .await
            .unwrap();

        let err = workflow
            .approve(request.id, IdFixtures::admin(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::InvalidTransition { .. }));
        // The ownership from the first approval is unaffected
        assert_sole_owner(&registry, IdFixtures::contact_x(), IdFixtures::alice()).await;
    }

    #[tokio::test]
    async fn test_approve_unknown_request_is_not_found() {
        let stores = TestStores::new();
        let (_ledger, _registry, workflow) = stores.workflow().await;

        let err = workflow
            .approve(ClaimRequestId::new(), IdFixtures::admin(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_losing_request_is_auto_rejected() {
        let stores = TestStores::new();
        let (ledger, registry, workflow) = stores.workflow().await;
        let contact = IdFixtures::contact_x();

        let request_a = workflow
            .submit(IdFixtures::alice(), contact, None)
            .await
            .unwrap();
        let request_b = workflow
            .submit(IdFixtures::bob(), contact, None)
            .await
            .unwrap();

        workflow
            .approve(request_a.id, IdFixtures::admin(), None)
            .await
            .unwrap();

        let err = workflow
            .approve(request_b.id, IdFixtures::admin(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::ContactAlreadyOwned(c) if c == contact));
        assert_request_status(&ledger, request_a.id, ClaimStatus::Approved).await;
        assert_request_status(&ledger, request_b.id, ClaimStatus::Rejected).await;
        assert_sole_owner(&registry, contact, IdFixtures::alice()).await;

        let loser = ledger.find_by_id(request_b.id).await.unwrap();
        assert_eq!(loser.reviewer_comment.as_deref(), Some(ALREADY_CLAIMED_COMMENT));
    }
}

// ============================================================================
// Reject Tests
// ============================================================================

mod reject_tests {
    use super::*;

    #[tokio::test]
    async fn test_reject_has_no_ownership_side_effect() {
        let stores = TestStores::new();
        let (ledger, registry, workflow) = stores.workflow().await;

        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
        let rejected = workflow
            .reject(request.id, IdFixtures::admin(), Some("not yours".to_string()))
            .await
            .unwrap();

        assert_eq!(rejected.status, ClaimStatus::Rejected);
        assert_eq!(rejected.reviewer_comment.as_deref(), Some("not yours"));
        assert_request_status(&ledger, request.id, ClaimStatus::Rejected).await;
        assert_unowned(&registry, IdFixtures::contact_x()).await;
    }

    #[tokio::test]
    async fn test_reject_then_approve_fails() {
        let stores = TestStores::new();
        let (_ledger, registry, workflow) = stores.workflow().await;

        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
        workflow
            .reject(request.id, IdFixtures::admin(), None)
            .await
            .unwrap();

        let err = workflow
            .approve(request.id, IdFixtures::admin(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::InvalidTransition { .. }));
        assert_unowned(&registry, IdFixtures::contact_x()).await;
    }
}

// ============================================================================
// Revoke Tests
// ============================================================================

mod revoke_tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke_deletes_pending_request() {
        let stores = TestStores::new();
        let (ledger, _registry, workflow) = stores.workflow().await;

        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();

        workflow.revoke(request.id, IdFixtures::alice()).await.unwrap();

        assert!(matches!(
            ledger.find_by_id(request.id).await,
            Err(ClaimError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_revoke_by_other_user_fails() {
        let stores = TestStores::new();
        let (ledger, _registry, workflow) = stores.workflow().await;

        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();

        let err = workflow
            .revoke(request.id, IdFixtures::bob())
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::RequesterMismatch { .. }));
        assert_request_status(&ledger, request.id, ClaimStatus::Pending).await;
    }

    #[tokio::test]
    async fn test_revoke_after_review_fails_and_leaves_entry() {
        let stores = TestStores::new();
        let (ledger, _registry, workflow) = stores.workflow().await;

        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
        workflow
            .approve(request.id, IdFixtures::admin(), None)
            .await
            .unwrap();

        let err = workflow
            .revoke(request.id, IdFixtures::alice())
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::InvalidState { .. }));
        assert_request_status(&ledger, request.id, ClaimStatus::Approved).await;
    }
}

// ============================================================================
// Batch Tests
// ============================================================================

mod batch_tests {
    use super::*;

    #[tokio::test]
    async fn test_batch_approve_same_contact_has_one_winner() {
        let stores = TestStores::new();
        let (ledger, registry, workflow) = stores.workflow().await;
        let contact = IdFixtures::contact_x();

        let request_a = workflow
            .submit(IdFixtures::alice(), contact, None)
            .await
            .unwrap();
        let request_b = workflow
            .submit(IdFixtures::bob(), contact, None)
            .await
            .unwrap();

        let report = workflow
            .batch_approve(&[request_a.id, request_b.id], IdFixtures::admin(), None)
            .await;

        assert_eq!(report.total(), 2);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert!(report.outcomes[0].result.is_ok());
        assert!(matches!(
            report.outcomes[1].result,
            Err(ClaimError::ContactAlreadyOwned(_))
        ));

        assert_request_status(&ledger, request_a.id, ClaimStatus::Approved).await;
        assert_request_status(&ledger, request_b.id, ClaimStatus::Rejected).await;
        assert_sole_owner(&registry, contact, IdFixtures::alice()).await;
    }

    #[tokio::test]
    async fn test_batch_approve_failure_does_not_block_later_items() {
        let stores = TestStores::new();
        let (ledger, _registry, workflow) = stores.workflow().await;

        let unknown = ClaimRequestId::new();
        let request = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();

        let report = workflow
            .batch_approve(&[unknown, request.id], IdFixtures::admin(), None)
            .await;

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert!(matches!(
            report.outcomes[0].result,
            Err(ClaimError::NotFound(_))
        ));
        assert_request_status(&ledger, request.id, ClaimStatus::Approved).await;
    }

    #[tokio::test]
    async fn test_batch_reject_processes_all_items() {
        let stores = TestStores::new();
        let (ledger, registry, workflow) = stores.workflow().await;

        let request_a = workflow
            .submit(IdFixtures::alice(), IdFixtures::contact_x(), None)
            .await
            .unwrap();
        let request_b = workflow
            .submit(IdFixtures::bob(), IdFixtures::contact_y(), None)
            .await
            .unwrap();

        let report = workflow
            .batch_reject(
                &[request_a.id, request_b.id],
                IdFixtures::admin(),
                Some("bulk cleanup"),
            )
            .await;

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 0);
        assert_request_status(&ledger, request_a.id, ClaimStatus::Rejected).await;
        assert_request_status(&ledger, request_b.id, ClaimStatus::Rejected).await;
        assert_unowned(&registry, IdFixtures::contact_x()).await;

        let rejected = ledger.find_by_id(request_a.id).await.unwrap();
        assert_eq!(rejected.reviewer_comment.as_deref(), Some("bulk cleanup"));
    }
}

// ============================================================================
// Race Tests
// ============================================================================

mod race_tests {
    use super::*;

    /// Two admins approving two different pending requests for one contact:
    /// exactly one approval wins and the other request is auto-rejected.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_approvals_for_same_contact() {
        for _ in 0..16 {
            let stores = TestStores::new();
            let (ledger, registry, workflow) = stores.workflow().await;
            let workflow = Arc::new(workflow);
            let contact = ContactId::new();

            let request_a = workflow
                .submit(IdFixtures::alice(), contact, None)
                .await
                .unwrap();
            let request_b = workflow
                .submit(IdFixtures::bob(), contact, None)
                .await
                .unwrap();

            let approve_a = {
                let workflow = workflow.clone();
                tokio::spawn(
                    async move { workflow.approve(request_a.id, IdFixtures::admin(), None).await },
                )
            };
            let approve_b = {
                let workflow = workflow.clone();
                tokio::spawn(
                    async move { workflow.approve(request_b.id, IdFixtures::admin(), None).await },
                )
            };

            let result_a = approve_a.await.unwrap();
            let result_b = approve_b.await.unwrap();

            let (winner, loser, winner_user) = match (&result_a, &result_b) {
                (Ok(_), Err(ClaimError::ContactAlreadyOwned(_))) => {
                    (request_a.id, request_b.id, IdFixtures::alice())
                }
                (Err(ClaimError::ContactAlreadyOwned(_)), Ok(_)) => {
                    (request_b.id, request_a.id, IdFixtures::bob())
                }
                other => panic!("expected one winner and one auto-rejection, got {:?}", other),
            };

            assert_request_status(&ledger, winner, ClaimStatus::Approved).await;
            assert_request_status(&ledger, loser, ClaimStatus::Rejected).await;
            assert_sole_owner(&registry, contact, winner_user).await;

            let rejected = ledger.find_by_id(loser).await.unwrap();
            assert_eq!(
                rejected.reviewer_comment.as_deref(),
                Some(ALREADY_CLAIMED_COMMENT)
            );
        }
    }

    /// A batch job racing an individual approval never produces two owners.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_batch_racing_individual_approval() {
        let stores = TestStores::new();
        let (_ledger, registry, workflow) = stores.workflow().await;
        let workflow = Arc::new(workflow);
        let contact = ContactId::new();

        let request_a = workflow
            .submit(UserId::new(), contact, None)
            .await
            .unwrap();
        let request_b = workflow
            .submit(UserId::new(), contact, None)
            .await
            .unwrap();

        let batch = {
            let workflow = workflow.clone();
            tokio::spawn(async move {
                workflow
                    .batch_approve(&[request_a.id], IdFixtures::admin(), None)
                    .await
            })
        };
        let single = {
            let workflow = workflow.clone();
            tokio::spawn(
                async move { workflow.approve(request_b.id, IdFixtures::admin(), None).await },
            )
        };

        let report = batch.await.unwrap();
        let result = single.await.unwrap();

        let batch_won = report.succeeded == 1;
        let single_won = result.is_ok();
        assert!(
            batch_won ^ single_won,
            "exactly one side should win: batch_won={}, single_won={}",
            batch_won,
            single_won
        );

        let all = registry.list_all().await;
        assert_eq!(all.iter().filter(|o| o.contact_id == contact).count(), 1);
    }
}
