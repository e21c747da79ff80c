//! Ownership registry
//!
//! Owns the contact → user ownership collection and enforces the
//! single-owner invariant. All mutations hold the registry mutex across the
//! existence check, the in-memory change, and the snapshot write, so
//! [`OwnershipRegistry::create`] is the linearization point for uniqueness:
//! two racing creates for the same contact always resolve to one winner.

use std::collections::HashSet;

use tokio::sync::Mutex;

use core_kernel::{ContactId, UserId};
use infra_store::SnapshotStore;

use crate::error::OwnershipError;
use crate::ownership::Ownership;

/// Per-item outcome of a batch import
#[derive(Debug)]
pub struct ImportRow {
    pub contact_id: ContactId,
    pub user_id: UserId,
    pub result: Result<Ownership, OwnershipError>,
}

/// Result of a batch import; items succeed and fail independently
#[derive(Debug)]
pub struct ImportReport {
    pub rows: Vec<ImportRow>,
    pub created: usize,
    pub failed: usize,
}

impl ImportReport {
    fn from_rows(rows: Vec<ImportRow>) -> Self {
        let created = rows.iter().filter(|row| row.result.is_ok()).count();
        let failed = rows.len() - created;
        Self {
            rows,
            created,
            failed,
        }
    }

    /// Total number of items processed
    pub fn total(&self) -> usize {
        self.rows.len()
    }
}

/// Registry of contact ownerships backed by a snapshot store
pub struct OwnershipRegistry {
    store: SnapshotStore<Ownership>,
    ownerships: Mutex<Vec<Ownership>>,
}

impl OwnershipRegistry {
    /// Opens the registry, loading the persisted collection
    pub async fn open(store: SnapshotStore<Ownership>) -> Result<Self, OwnershipError> {
        let ownerships = store.load().await?;
        tracing::info!(count = ownerships.len(), "ownership registry loaded");
        Ok(Self {
            store,
            ownerships: Mutex::new(ownerships),
        })
    }

    /// Creates an ownership record for a contact
    ///
    /// Fails with [`OwnershipError::AlreadyOwned`] if any ownership for the
    /// contact exists, regardless of user. Callers must treat this check as
    /// authoritative: the check and the insertion happen under one lock
    /// acquisition and the snapshot is persisted before the lock is released.
    pub async fn create(
        &self,
        contact_id: ContactId,
        user_id: UserId,
    ) -> Result<Ownership, OwnershipError> {
        let mut ownerships = self.ownerships.lock().await;

        if ownerships.iter().any(|o| o.contact_id == contact_id) {
            return Err(OwnershipError::AlreadyOwned(contact_id));
        }

        let ownership = Ownership::new(contact_id, user_id);
        ownerships.push(ownership.clone());
        if let Err(err) = self.store.save(&ownerships).await {
            ownerships.pop();
            tracing::error!(
                operation = "ownership.create",
                contact_id = %contact_id,
                user_id = %user_id,
                error = %err,
                "failed to persist ownership collection"
            );
            return Err(err.into());
        }

        Ok(ownership)
    }

    /// Returns the ownership record for a contact, if any
    pub async fn find_by_contact(&self, contact_id: ContactId) -> Option<Ownership> {
        let ownerships = self.ownerships.lock().await;
        ownerships
            .iter()
            .find(|o| o.contact_id == contact_id)
            .cloned()
    }

    /// Whether any user owns the contact
    pub async fn is_claimed(&self, contact_id: ContactId) -> bool {
        let ownerships = self.ownerships.lock().await;
        ownerships.iter().any(|o| o.contact_id == contact_id)
    }

    /// Whether this specific user owns the contact
    pub async fn has_ownership(&self, contact_id: ContactId, user_id: UserId) -> bool {
        let ownerships = self.ownerships.lock().await;
        ownerships
            .iter()
            .any(|o| o.contact_id == contact_id && o.user_id == user_id)
    }

    /// All contacts owned by the user, in insertion order
    pub async fn list_by_user(&self, user_id: UserId) -> Vec<Ownership> {
        let ownerships = self.ownerships.lock().await;
        ownerships
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Every ownership record, in insertion order
    pub async fn list_all(&self) -> Vec<Ownership> {
        self.ownerships.lock().await.clone()
    }

    /// Deletes the ownership matching the (contact, user) pair exactly
    pub async fn delete(
        &self,
        contact_id: ContactId,
        user_id: UserId,
    ) -> Result<(), OwnershipError> {
        let mut ownerships = self.ownerships.lock().await;

        let index = ownerships
            .iter()
            .position(|o| o.contact_id == contact_id && o.user_id == user_id)
            .ok_or(OwnershipError::NotFound {
                contact_id,
                user_id,
            })?;

        let removed = ownerships.remove(index);
        if let Err(err) = self.store.save(&ownerships).await {
            ownerships.insert(index, removed);
            tracing::error!(
                operation = "ownership.delete",
                contact_id = %contact_id,
                user_id = %user_id,
                error = %err,
                "failed to persist ownership collection"
            );
            return Err(err.into());
        }

        Ok(())
    }

    /// Moves ownership of a contact from one user to another
    ///
    /// The delete and create happen as one logical unit under the registry
    /// lock with a single snapshot write. On a failed persist the in-memory
    /// state is rolled back and the error is reported; the previous owner is
    /// still in place and the caller may retry.
    pub async fn transfer(
        &self,
        contact_id: ContactId,
        from_user_id: UserId,
        to_user_id: UserId,
    ) -> Result<Ownership, OwnershipError> {
        let mut ownerships = self.ownerships.lock().await;

        let index = ownerships
            .iter()
            .position(|o| o.contact_id == contact_id && o.user_id == from_user_id)
            .ok_or(OwnershipError::NotFound {
                contact_id,
                user_id: from_user_id,
            })?;

        // Snapshots written before the single-owner rule may hold several
        // owners per contact; the target check still has to look past the
        // source record.
        if ownerships
            .iter()
            .any(|o| o.contact_id == contact_id && o.user_id == to_user_id)
        {
            return Err(OwnershipError::AlreadyOwned(contact_id));
        }

        let removed = ownerships.remove(index);
        let replacement = Ownership::new(contact_id, to_user_id);
        ownerships.push(replacement.clone());

        if let Err(err) = self.store.save(&ownerships).await {
            ownerships.pop();
            ownerships.insert(index, removed);
            tracing::error!(
                operation = "ownership.transfer",
                contact_id = %contact_id,
                from_user_id = %from_user_id,
                to_user_id = %to_user_id,
                error = %err,
                "failed to persist ownership collection"
            );
            return Err(err.into());
        }

        Ok(replacement)
    }

    /// Filters `candidates` down to the contacts with no owner
    ///
    /// Order of the candidates is preserved.
    pub async fn unclaimed_among(&self, candidates: &[ContactId]) -> Vec<ContactId> {
        let ownerships = self.ownerships.lock().await;
        let claimed: HashSet<ContactId> = ownerships.iter().map(|o| o.contact_id).collect();
        candidates
            .iter()
            .copied()
            .filter(|id| !claimed.contains(id))
            .collect()
    }

    /// Batch import of ownership assignments
    ///
    /// Each pair goes through [`create`](Self::create) sequentially; one
    /// item failing never blocks or rolls back the others.
    pub async fn create_batch(&self, assignments: &[(ContactId, UserId)]) -> ImportReport {
        let mut rows = Vec::with_capacity(assignments.len());
        for &(contact_id, user_id) in assignments {
            let result = self.create(contact_id, user_id).await;
            rows.push(ImportRow {
                contact_id,
                user_id,
                result,
            });
        }
        ImportReport::from_rows(rows)
    }

    /// Number of distinct contacts with an owner
    pub async fn claimed_contact_count(&self) -> usize {
        let ownerships = self.ownerships.lock().await;
        let distinct: HashSet<ContactId> = ownerships.iter().map(|o| o.contact_id).collect();
        distinct.len()
    }
}
