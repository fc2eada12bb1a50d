//! Error types for the version catalog.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while scanning a package directory.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read a directory.
    #[error("failed to read {}: {}", path.display(), source)]
    ReadFailed { path: PathBuf, source: io::Error },

    /// No parseable version directory matched the selection query.
    #[error("no version found under {}{}", package_dir.display(), family_clause(family))]
    NoVersionsFound {
        package_dir: PathBuf,
        family: Option<String>,
    },
}

fn family_clause(family: &Option<String>) -> String {
    match family {
        Some(family) => format!(" for family {}", family),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_versions_display_without_family() {
        let err = CatalogError::NoVersionsFound {
            package_dir: PathBuf::from("/repo/ruby"),
            family: None,
        };
        assert_eq!(err.to_string(), "no version found under /repo/ruby");
    }

    #[test]
    fn test_no_versions_display_with_family() {
        let err = CatalogError::NoVersionsFound {
            package_dir: PathBuf::from("/repo/ruby"),
            family: Some("1.2".to_string()),
        };
        assert!(err.to_string().contains("for family 1.2"));
    }

    #[test]
    fn test_read_failed_source() {
        use std::error::Error;

        let err = CatalogError::ReadFailed {
            path: PathBuf::from("/repo"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("/repo"));
    }
}
