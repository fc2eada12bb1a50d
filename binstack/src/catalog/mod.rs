//! Version catalog over an on-disk artifact tree.
//!
//! A binary repository is a plain directory tree of
//! `package/version/file...` entries. The version directories are the only
//! source of truth: there is no separate metadata file. This module answers
//! the two questions the rest of the system asks about that tree:
//!
//! - which major.minor version families exist under a package directory
//! - which version is the latest, overall or within one family
//!
//! Folder names that do not look like versions are excluded from selection
//! rather than treated as errors, so a stray directory never aborts a scan.

mod error;
mod scan;
mod version;

pub use error::{CatalogError, CatalogResult};
pub use scan::{latest_version, list_packages, list_versions, major_minor_families};
pub use version::{parse_version, ArtifactVersion, ParsedVersion};
