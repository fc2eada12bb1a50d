//! Static configuration file.
//!
//! Binstack reads an INI file from the user configuration directory
//! (`<config dir>/binstack/config.ini`). Every key has a default, a missing
//! file simply yields the defaults, and loading never fails the program:
//! callers use `ConfigFile::load().unwrap_or_default()`.

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::bundle::BundleLayout;
use crate::fetch::DEFAULT_CONCURRENCY;

/// Directory under the user config dir holding our configuration.
const CONFIG_DIR: &str = "binstack";

/// Configuration filename.
const CONFIG_FILENAME: &str = "config.ini";

/// Default download base URL.
const DEFAULT_BASE_URL: &str = "https://downloads.binstack.dev/stacks";

/// Default stack identifier.
const DEFAULT_STACK: &str = "linux-x86_64";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// `[repository]` section: where artifacts are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Download base URL, without the stack segment.
    pub base_url: String,

    /// Stack identifier appended to the base URL.
    pub stack: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stack: DEFAULT_STACK.to_string(),
        }
    }
}

/// `[download]` section: fetch engine tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Worker pool size for a fetch batch.
    pub concurrency: usize,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[bundle]` section: what a distributable archive carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    /// Base name of bundle archives.
    pub name: String,

    /// Root of the build pack checkout.
    pub pack_root: PathBuf,

    /// Support directories to embed, relative to the pack root.
    pub support_dirs: Vec<String>,

    /// The pack configuration file to rewrite, relative to the pack root.
    pub config_file: PathBuf,
}

impl Default for BundleConfig {
    fn default() -> Self {
        let layout = BundleLayout::default();
        Self {
            name: layout.name,
            pack_root: PathBuf::from("."),
            support_dirs: layout.support_dirs,
            config_file: layout.config_file,
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub repository: RepositoryConfig,
    pub download: DownloadConfig,
    pub bundle: BundleConfig,
}

impl ConfigFile {
    /// The conventional location of the configuration file.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
    }

    /// Load from the conventional location.
    ///
    /// Returns `None` when the file does not exist or cannot be parsed;
    /// callers fall back to defaults.
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Option<Self> {
        let ini = Ini::load_from_file(path).ok()?;
        Some(Self::from_ini(&ini))
    }

    /// Build a config from parsed INI, defaulting every missing key.
    fn from_ini(ini: &Ini) -> Self {
        let defaults = Self::default();

        let get = |section: &str, key: &str| -> Option<String> {
            ini.section(Some(section))
                .and_then(|s| s.get(key))
                .map(str::to_string)
        };

        let repository = RepositoryConfig {
            base_url: get("repository", "base_url").unwrap_or(defaults.repository.base_url),
            stack: get("repository", "stack").unwrap_or(defaults.repository.stack),
        };

        let download = DownloadConfig {
            concurrency: get("download", "concurrency")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.download.concurrency),
            timeout_secs: get("download", "timeout_secs")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.download.timeout_secs),
        };

        let bundle = BundleConfig {
            name: get("bundle", "name").unwrap_or(defaults.bundle.name),
            pack_root: get("bundle", "pack_root")
                .map(PathBuf::from)
                .unwrap_or(defaults.bundle.pack_root),
            support_dirs: get("bundle", "support_dirs")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.bundle.support_dirs),
            config_file: get("bundle", "config_file")
                .map(PathBuf::from)
                .unwrap_or(defaults.bundle.config_file),
        };

        Self {
            repository,
            download,
            bundle,
        }
    }

    /// The effective URL base for index generation: `base_url/stack`.
    ///
    /// The index builder only ever sees this joined form.
    pub fn url_base(&self) -> String {
        format!(
            "{}/{}",
            self.repository.base_url.trim_end_matches('/'),
            self.repository.stack
        )
    }

    /// The bundle layout described by this configuration.
    pub fn bundle_layout(&self) -> BundleLayout {
        BundleLayout {
            name: self.bundle.name.clone(),
            support_dirs: self.bundle.support_dirs.clone(),
            config_file: self.bundle.config_file.clone(),
        }
    }
}
