//! Full-collection snapshot store
//!
//! Each collection is persisted as a single JSON file that is rewritten in
//! full after every mutation. Writes go to a temp file that is renamed over
//! the previous snapshot, so a crash mid-write leaves the old snapshot
//! intact rather than a torn file.
//!
//! The store itself is not concurrent-safe: the owning component serializes
//! access (typically by holding its collection behind a mutex across the
//! check-mutate-persist sequence).

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use crate::error::StorageError;

/// Snapshot-backed persistence for a flat collection of records
pub struct SnapshotStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> Vec<T>>,
}

impl<T> SnapshotStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a store for the named collection file under `data_dir`
    ///
    /// Nothing is touched on disk until [`load`](Self::load) or
    /// [`save`](Self::save) is called.
    pub fn new(data_dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(file_name),
            _records: PhantomData,
        }
    }

    /// Returns the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted collection
    ///
    /// A missing snapshot is not an error: the store writes an empty
    /// collection and returns it, so first startup and restart look the
    /// same to the caller. A snapshot that exists but fails to decode is
    /// surfaced as [`StorageError::Corrupted`].
    pub async fn load(&self) -> Result<Vec<T>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupted {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no snapshot found, initializing empty collection");
                let empty = Vec::new();
                self.save(&empty).await?;
                Ok(empty)
            }
            Err(source) => Err(StorageError::ReadFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Replaces the persisted collection with `records`
    ///
    /// On failure the previous snapshot is still in place, and the caller
    /// must not treat the corresponding in-memory mutation as committed.
    pub async fn save(&self, records: &[T]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::WriteFailed {
                    path: self.path.clone(),
                    source,
                })?;
        }

        let json =
            serde_json::to_vec_pretty(records).map_err(|source| StorageError::EncodeFailed {
                path: self.path.clone(),
                source,
            })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &json)
            .await
            .map_err(|source| StorageError::WriteFailed {
                path: tmp.clone(),
                source,
            })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StorageError::WriteFailed {
                path: self.path.clone(),
                source,
            })
    }
}
