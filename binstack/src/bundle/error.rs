//! Error types for bundle assembly.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Errors that can occur while building a bundle.
///
/// All of these are fatal to the packaging run.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Invalid input path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Failed to create a directory.
    #[error("failed to create directory {}: {}", path.display(), source)]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// Failed to read a file or directory.
    #[error("failed to read {}: {}", path.display(), source)]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a file.
    #[error("failed to write {}: {}", path.display(), source)]
    WriteFailed { path: PathBuf, source: io::Error },

    /// Archive writing failed.
    #[error("archive failed: {0}")]
    ArchiveFailed(String),

    /// The embedded configuration could not be rewritten.
    #[error("config rewrite failed: {0}")]
    ConfigRewrite(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let err = BundleError::InvalidPath("binary path does not exist".to_string());
        assert!(err.to_string().contains("invalid path"));
    }

    #[test]
    fn test_read_failed_display() {
        let err = BundleError::ReadFailed {
            path: PathBuf::from("/pack/conf/binstack.ini"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("conf/binstack.ini"));
    }
}
