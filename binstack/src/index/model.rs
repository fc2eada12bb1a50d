//! The serializable index structure.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{IndexError, IndexResult};

/// Mapping of package name to version to download URLs.
///
/// Backed by ordered maps so the serialized content is deterministic for a
/// given repository state. The index carries no schema version field; it is
/// consumed byte-identically by the fetch workflow and treated as immutable
/// once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactIndex {
    entries: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl ArtifactIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the download URLs for one package version.
    pub fn insert(
        &mut self,
        package: impl Into<String>,
        version: impl Into<String>,
        urls: Vec<String>,
    ) {
        self.entries
            .entry(package.into())
            .or_default()
            .insert(version.into(), urls);
    }

    /// Whether the index holds no packages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of packages in the index.
    pub fn package_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of artifact URLs across all packages and versions.
    pub fn artifact_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|versions| versions.values())
            .map(|urls| urls.len())
            .sum()
    }

    /// Iterate over package names.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The versions recorded for a package, if any.
    pub fn versions(&self, package: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.entries.get(package)
    }

    /// Iterate over every `(package, version, urls)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[String])> {
        self.entries.iter().flat_map(|(package, versions)| {
            versions
                .iter()
                .map(move |(version, urls)| (package.as_str(), version.as_str(), urls.as_slice()))
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> IndexResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Parse an index from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load an index from a file.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::ReadFailed`] if the file cannot be read and
    /// [`IndexError::ParseFailed`] if it is not valid index JSON.
    pub fn load(path: &Path) -> IndexResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| IndexError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&text).map_err(|e| IndexError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the index to a file as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> IndexResult<()> {
        let text = self.to_json_pretty()?;
        fs::write(path, text).map_err(|e| IndexError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_index() -> ArtifactIndex {
        let mut index = ArtifactIndex::new();
        index.insert(
            "ruby",
            "1.9.3",
            vec![
                "https://example.com/stack/ruby/1.9.3/ruby.tgz".to_string(),
                "https://example.com/stack/ruby/1.9.3/ruby-gems.tgz".to_string(),
            ],
        );
        index.insert(
            "node",
            "0.10.0",
            vec!["https://example.com/stack/node/0.10.0/node.tgz".to_string()],
        );
        index
    }

    #[test]
    fn test_counts() {
        let index = sample_index();
        assert_eq!(index.package_count(), 2);
        assert_eq!(index.artifact_count(), 3);
        assert!(!index.is_empty());
        assert!(ArtifactIndex::new().is_empty());
    }

    #[test]
    fn test_iter_triples() {
        let index = sample_index();
        let triples: Vec<_> = index.iter().collect();

        assert_eq!(triples.len(), 2);
        // BTreeMap ordering: node before ruby.
        assert_eq!(triples[0].0, "node");
        assert_eq!(triples[1].0, "ruby");
        assert_eq!(triples[1].2.len(), 2);
    }

    #[test]
    fn test_versions_lookup() {
        let index = sample_index();
        assert!(index.versions("ruby").unwrap().contains_key("1.9.3"));
        assert!(index.versions("python").is_none());
    }

    #[test]
    fn test_json_shape() {
        let index = sample_index();
        let json = index.to_json_pretty().unwrap();

        // Top level is a plain object keyed by package name.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("ruby").is_some());
        assert_eq!(
            value["node"]["0.10.0"][0],
            "https://example.com/stack/node/0.10.0/node.tgz"
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let a = sample_index().to_json_pretty().unwrap();
        let b = sample_index().to_json_pretty().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index-latest.json");

        let index = sample_index();
        index.write(&path).unwrap();

        let loaded = ArtifactIndex::load(&path).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ArtifactIndex::load(Path::new("/nonexistent/index.json"));
        assert!(matches!(result, Err(IndexError::ReadFailed { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index-latest.json");
        fs::write(&path, "not json").unwrap();

        let result = ArtifactIndex::load(&path);
        assert!(matches!(result, Err(IndexError::ParseFailed { .. })));
    }
}
