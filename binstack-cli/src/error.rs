//! Error type for CLI commands.

use std::io;

use thiserror::Error;

use binstack::bundle::BundleError;
use binstack::catalog::CatalogError;
use binstack::fetch::FetchError;
use binstack::index::IndexError;

/// Errors surfaced to the user as a one-line message and a nonzero exit.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command usage not already caught by argument parsing.
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// Failed to create the scratch download directory.
    #[error("failed to create scratch directory: {0}")]
    Scratch(#[from] io::Error),
}
