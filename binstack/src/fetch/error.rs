//! Error types for the fetch engine.
//!
//! Only process-level failures are errors here. A per-URL transfer failure
//! is an outcome ([`crate::fetch::FetchOutcome::Failed`]), reported and
//! contained within its batch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::http::HttpError;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Process-level errors that abort a fetch run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to create a directory of the local cache layout.
    #[error("failed to create directory {}: {}", path.display(), source)]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    ClientInit(#[from] HttpError),
}
