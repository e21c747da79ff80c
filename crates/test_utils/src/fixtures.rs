//! Pre-built test fixtures
//!
//! Deterministic identifiers and ready-made store/ledger/registry setups so
//! tests only spell out what they actually care about.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;
use uuid::Uuid;

use core_kernel::{ContactId, UserId};
use domain_claims::{ClaimLedger, ClaimRequest, ClaimWorkflow};
use domain_ownership::{Ownership, OwnershipRegistry};
use infra_store::SnapshotStore;

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// A regular user ("Alice"), stable across runs
    pub fn alice() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0xA11C_E000_0000_0000_0000_0000_0000_0001))
    }

    /// A second regular user ("Bob"), stable across runs
    pub fn bob() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0xB0B0_0000_0000_0000_0000_0000_0000_0002))
    }

    /// An administrator, stable across runs
    pub fn admin() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0xAD31_0000_0000_0000_0000_0000_0000_0003))
    }

    /// A contact record, stable across runs
    pub fn contact_x() -> ContactId {
        ContactId::from_uuid(Uuid::from_u128(0xC0DE_0000_0000_0000_0000_0000_0000_0010))
    }

    /// A second contact record, stable across runs
    pub fn contact_y() -> ContactId {
        ContactId::from_uuid(Uuid::from_u128(0xC0DE_0000_0000_0000_0000_0000_0000_0011))
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A fixed submission timestamp (Mar 1, 2025)
    pub fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    /// A fixed review timestamp, after [`submitted_at`](Self::submitted_at)
    pub fn reviewed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 2, 14, 0, 0).unwrap()
    }
}

/// A temp-dir-backed pair of snapshot stores plus openers for the domain
/// services built on them
///
/// Keep the fixture alive for the duration of the test; dropping it removes
/// the backing directory.
pub struct TestStores {
    dir: TempDir,
}

impl TestStores {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp data dir"),
        }
    }

    /// Path of the backing data directory
    pub fn data_dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn claim_store(&self) -> SnapshotStore<ClaimRequest> {
        SnapshotStore::new(self.dir.path(), "claim_requests.json")
    }

    pub fn ownership_store(&self) -> SnapshotStore<Ownership> {
        SnapshotStore::new(self.dir.path(), "contact_ownership.json")
    }

    pub async fn ledger(&self) -> ClaimLedger {
        ClaimLedger::open(self.claim_store())
            .await
            .expect("failed to open claim ledger")
    }

    pub async fn registry(&self) -> OwnershipRegistry {
        OwnershipRegistry::open(self.ownership_store())
            .await
            .expect("failed to open ownership registry")
    }

    /// The full coordinator wiring: ledger + registry + workflow
    pub async fn workflow(&self) -> (Arc<ClaimLedger>, Arc<OwnershipRegistry>, ClaimWorkflow) {
        let ledger = Arc::new(self.ledger().await);
        let registry = Arc::new(self.registry().await);
        let workflow = ClaimWorkflow::new(ledger.clone(), registry.clone());
        (ledger, registry, workflow)
    }
}

impl Default for TestStores {
    fn default() -> Self {
        Self::new()
    }
}
