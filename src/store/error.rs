//! Error types for the JSON-backed book store.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that the store cannot recover from on its own.
///
/// A missing or malformed catalog file is not an error; see
/// [`LoadOutcome`](super::LoadOutcome).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or replacing the catalog file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parent directory of the catalog file could not be created.
    #[error("failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory collection could not be encoded as JSON.
    #[error("failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
