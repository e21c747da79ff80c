//! Storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a collection snapshot
///
/// A `Corrupted` snapshot is an unrecoverable fault for that collection;
/// the other variants are I/O-level failures the caller surfaces as a
/// request-fatal error without committing the in-memory mutation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Snapshot file could not be read
    #[error("failed to read snapshot {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file could not be written or replaced
    #[error("failed to write snapshot {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot exists but does not decode as the expected collection
    #[error("snapshot {path} is corrupted: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Collection could not be encoded for persistence
    #[error("failed to encode snapshot {path}: {source}")]
    EncodeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
