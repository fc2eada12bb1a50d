//! Directory scanning and version selection.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use super::error::{CatalogError, CatalogResult};
use super::version::{parse_version, ArtifactVersion};

/// Reserved suffix marking a directory entry as metadata, not a package.
const METADATA_SUFFIX: &str = ".json";

/// List the package directories under a binary tree root.
///
/// Entries whose name ends in `.json` are index metadata, not packages,
/// and are skipped along with non-directories.
pub fn list_packages(binary_path: &Path) -> CatalogResult<Vec<String>> {
    Ok(list_versions(binary_path)?
        .into_iter()
        .filter(|name| !name.ends_with(METADATA_SUFFIX))
        .collect())
}

/// List the immediate subdirectory names of a package directory.
///
/// Non-directory entries are ignored. The names are returned raw; callers
/// decide whether to parse them.
pub fn list_versions(package_dir: &Path) -> CatalogResult<Vec<String>> {
    let entries = fs::read_dir(package_dir).map_err(|e| CatalogError::ReadFailed {
        path: package_dir.to_path_buf(),
        source: e,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CatalogError::ReadFailed {
            path: package_dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Enumerate the major.minor families present under a package directory.
///
/// Each parseable version directory contributes its first two components as
/// a `MAJOR.MINOR` key; duplicates collapse. Unparseable names contribute
/// nothing, so a stray folder cannot invent a family.
///
/// # Examples
///
/// Directories `1.2.3`, `1.2.10` and `2.0.0` yield the families
/// `{"1.2", "2.0"}`.
pub fn major_minor_families(package_dir: &Path) -> CatalogResult<BTreeSet<String>> {
    let mut families = BTreeSet::new();
    for name in list_versions(package_dir)? {
        if let Some(version) = parse_version(&name).into_parsed() {
            families.insert(version.major_minor());
        }
    }
    Ok(families)
}

/// Select the latest version directory under a package directory.
///
/// Every immediate subdirectory is parsed; unparseable names are excluded
/// from the comparison set. When `family` is given, only versions belonging
/// to that `MAJOR.MINOR` family are considered. The returned string is the
/// directory name exactly as it appears on disk.
///
/// # Errors
///
/// Returns [`CatalogError::NoVersionsFound`] if no directory in the
/// (possibly family-restricted) set parses.
pub fn latest_version(package_dir: &Path, family: Option<&str>) -> CatalogResult<String> {
    let mut candidates: Vec<(String, ArtifactVersion)> = Vec::new();

    for name in list_versions(package_dir)? {
        let Some(version) = parse_version(&name).into_parsed() else {
            continue;
        };
        if let Some(family) = family {
            if version.major_minor() != family {
                continue;
            }
        }
        candidates.push((name, version));
    }

    candidates
        .into_iter()
        .max_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(name, _)| name)
        .ok_or_else(|| CatalogError::NoVersionsFound {
            package_dir: package_dir.to_path_buf(),
            family: family.map(str::to_string),
        })
}
