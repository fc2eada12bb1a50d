//! Error types for index construction and I/O.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while building, reading or writing an index.
///
/// These are fatal to the operation that raised them: a malformed
/// repository layout is not expected and propagates to the caller.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to read a file or directory.
    #[error("failed to read {}: {}", path.display(), source)]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write the serialized index.
    #[error("failed to write {}: {}", path.display(), source)]
    WriteFailed { path: PathBuf, source: io::Error },

    /// The index file did not contain valid index JSON.
    #[error("failed to parse index {}: {}", path.display(), source)]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Serialization failed.
    #[error("failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A catalog scan failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
