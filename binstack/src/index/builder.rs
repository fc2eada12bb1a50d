//! Index construction from an on-disk artifact tree.

use std::fs;
use std::path::PathBuf;

use crate::catalog;

use super::error::{IndexError, IndexResult};
use super::model::ArtifactIndex;

/// Builds an [`ArtifactIndex`] from a `package/version/file` tree.
///
/// By default only the latest version of each major.minor family is
/// indexed; [`IndexBuilder::include_all`] switches to indexing every
/// version directory present.
///
/// Building is a pure read of the filesystem: the builder returns an owned
/// index and leaves serialization to the caller.
///
/// # Example
///
/// ```ignore
/// use binstack::index::IndexBuilder;
///
/// let index = IndexBuilder::new("/repo/binaries", "https://example.com/stack")
///     .include_all(false)
///     .build()?;
/// println!("{}", index.to_json_pretty()?);
/// ```
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    binary_path: PathBuf,
    url_base: String,
    include_all: bool,
}

impl IndexBuilder {
    /// Create a builder over the given tree and URL base.
    pub fn new(binary_path: impl Into<PathBuf>, url_base: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
            url_base: url_base.into(),
            include_all: false,
        }
    }

    /// Index every version directory instead of only the latest per family.
    pub fn include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    /// Walk the tree and build the index.
    ///
    /// # Errors
    ///
    /// Fails if the tree cannot be read or, in latest-per-family mode, if a
    /// family yields no parseable version (which cannot happen for families
    /// enumerated from the same directory state).
    pub fn build(&self) -> IndexResult<ArtifactIndex> {
        let mut index = ArtifactIndex::new();

        for package in catalog::list_packages(&self.binary_path)? {
            let package_dir = self.binary_path.join(&package);

            let versions = if self.include_all {
                catalog::list_versions(&package_dir)?
            } else {
                let mut latest = Vec::new();
                for family in catalog::major_minor_families(&package_dir)? {
                    latest.push(catalog::latest_version(&package_dir, Some(family.as_str()))?);
                }
                latest
            };

            for version in versions {
                let urls = self.artifact_urls(&package, &version)?;
                index.insert(&package, &version, urls);
            }
        }

        Ok(index)
    }

    /// Build the download URLs for one package version.
    ///
    /// Hidden files (leading `.`) are excluded; the remaining filenames are
    /// sorted so the index content is deterministic.
    fn artifact_urls(&self, package: &str, version: &str) -> IndexResult<Vec<String>> {
        let version_dir = self.binary_path.join(package).join(version);
        let entries = fs::read_dir(&version_dir).map_err(|e| IndexError::ReadFailed {
            path: version_dir.clone(),
            source: e,
        })?;

        let mut filenames = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| IndexError::ReadFailed {
                path: version_dir.clone(),
                source: e,
            })?;

            let path = entry.path();
            if path.is_dir() {
                continue;
            }

            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    continue;
                }
                filenames.push(name.to_string());
            }
        }

        filenames.sort();
        Ok(filenames
            .into_iter()
            .map(|name| artifact_url(&self.url_base, package, version, &name))
            .collect())
    }
}

/// Join a base URL with the package/version/filename path.
///
/// A trailing slash on the base is tolerated and normalized away.
fn artifact_url(url_base: &str, package: &str, version: &str, filename: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        url_base.trim_end_matches('/'),
        package,
        version,
        filename
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    const BASE: &str = "https://example.com/stack";

    fn write_artifact(root: &Path, package: &str, version: &str, filename: &str) {
        let dir = root.join(package).join(version);
        fs::create_dir_all(&dir).unwrap();
        File::create(dir.join(filename))
            .unwrap()
            .write_all(b"artifact")
            .unwrap();
    }

    #[test]
    fn test_latest_per_family_selection() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "ruby", "1.0.0", "ruby.tgz");
        write_artifact(temp.path(), "ruby", "1.0.1", "ruby.tgz");
        write_artifact(temp.path(), "ruby", "2.0.0", "ruby.tgz");

        let index = IndexBuilder::new(temp.path(), BASE).build().unwrap();

        let versions = index.versions("ruby").unwrap();
        assert_eq!(versions.len(), 2);
        assert!(versions.contains_key("1.0.1"));
        assert!(versions.contains_key("2.0.0"));
        assert!(!versions.contains_key("1.0.0"));
    }

    #[test]
    fn test_include_all_selection() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "ruby", "1.0.0", "ruby.tgz");
        write_artifact(temp.path(), "ruby", "1.0.1", "ruby.tgz");
        write_artifact(temp.path(), "ruby", "2.0.0", "ruby.tgz");

        let index = IndexBuilder::new(temp.path(), BASE)
            .include_all(true)
            .build()
            .unwrap();

        assert_eq!(index.versions("ruby").unwrap().len(), 3);
    }

    #[test]
    fn test_url_shape() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "node", "0.10.0", "node.tgz");

        let index = IndexBuilder::new(temp.path(), BASE).build().unwrap();

        let urls = &index.versions("node").unwrap()["0.10.0"];
        assert_eq!(
            urls,
            &vec!["https://example.com/stack/node/0.10.0/node.tgz".to_string()]
        );
    }

    #[test]
    fn test_url_base_trailing_slash_normalized() {
        assert_eq!(
            artifact_url("https://example.com/stack/", "node", "0.10.0", "node.tgz"),
            "https://example.com/stack/node/0.10.0/node.tgz"
        );
    }

    #[test]
    fn test_hidden_files_excluded() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "ruby", "1.0.0", "ruby.tgz");
        write_artifact(temp.path(), "ruby", "1.0.0", ".checksums");

        let index = IndexBuilder::new(temp.path(), BASE).build().unwrap();

        let urls = &index.versions("ruby").unwrap()["1.0.0"];
        assert_eq!(urls.len(), 1);
        assert!(urls[0].ends_with("ruby.tgz"));
    }

    #[test]
    fn test_metadata_entries_skipped() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "ruby", "1.0.0", "ruby.tgz");
        File::create(temp.path().join("index-latest.json")).unwrap();
        fs::create_dir(temp.path().join("stale.json")).unwrap();

        let index = IndexBuilder::new(temp.path(), BASE).build().unwrap();

        assert_eq!(index.package_count(), 1);
        assert!(index.versions("ruby").is_some());
    }

    #[test]
    fn test_multiple_files_sorted() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "ruby", "1.0.0", "ruby.tgz");
        write_artifact(temp.path(), "ruby", "1.0.0", "gems.tgz");

        let index = IndexBuilder::new(temp.path(), BASE).build().unwrap();

        let urls = &index.versions("ruby").unwrap()["1.0.0"];
        assert_eq!(urls.len(), 2);
        assert!(urls[0].ends_with("gems.tgz"));
        assert!(urls[1].ends_with("ruby.tgz"));
    }

    #[test]
    fn test_unparseable_version_dirs_only_included_with_all() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "ruby", "1.0.0", "ruby.tgz");
        write_artifact(temp.path(), "ruby", "scratch", "junk.tgz");

        let latest = IndexBuilder::new(temp.path(), BASE).build().unwrap();
        assert!(!latest.versions("ruby").unwrap().contains_key("scratch"));

        let all = IndexBuilder::new(temp.path(), BASE)
            .include_all(true)
            .build()
            .unwrap();
        assert!(all.versions("ruby").unwrap().contains_key("scratch"));
    }

    #[test]
    fn test_missing_binary_path() {
        let result = IndexBuilder::new("/nonexistent/binaries", BASE).build();
        assert!(matches!(result, Err(IndexError::Catalog(_))));
    }

    #[test]
    fn test_empty_version_dir_yields_empty_url_list() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("ruby").join("1.0.0")).unwrap();

        let index = IndexBuilder::new(temp.path(), BASE).build().unwrap();

        assert_eq!(index.versions("ruby").unwrap()["1.0.0"].len(), 0);
    }

    #[test]
    fn test_round_trip_addresses_identical_triples() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "ruby", "1.0.0", "ruby.tgz");
        write_artifact(temp.path(), "node", "0.10.0", "node.tgz");

        let built = IndexBuilder::new(temp.path(), BASE).build().unwrap();

        let path = temp.path().join("index-latest.json");
        built.write(&path).unwrap();
        let loaded = crate::index::ArtifactIndex::load(&path).unwrap();

        let built_triples: Vec<_> = built.iter().collect();
        let loaded_triples: Vec<_> = loaded.iter().collect();
        assert_eq!(built_triples, loaded_triples);
    }
}
