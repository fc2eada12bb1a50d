//! Bundle archive assembly.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::error::{BundleError, BundleResult};
use super::naming::{bundle_filename, local_base_url, ARTIFACT_DIR};
use super::rewrite::rewrite_base_url;

/// What goes into a bundle besides the artifact tree.
#[derive(Debug, Clone)]
pub struct BundleLayout {
    /// Base name of the archive file.
    pub name: String,

    /// Support directories of the build pack, relative to the pack root.
    pub support_dirs: Vec<String>,

    /// The pack configuration file whose download base URL is rewritten,
    /// relative to the pack root.
    pub config_file: PathBuf,
}

impl Default for BundleLayout {
    fn default() -> Self {
        Self {
            name: "binstack".to_string(),
            support_dirs: vec!["bin".to_string(), "conf".to_string()],
            config_file: PathBuf::from("conf/binstack.ini"),
        }
    }
}

/// Result of building a bundle.
#[derive(Debug, Clone)]
pub struct BundleBuildResult {
    /// Full path of the written archive.
    pub archive_path: PathBuf,

    /// Number of file and symlink entries in the archive.
    pub entries: usize,

    /// Size of the archive in bytes.
    pub size: u64,
}

/// Build a distributable bundle archive.
///
/// The artifact tree at `binary_path` lands under the fixed top-level name
/// `binaries/`; each support directory lands under its own name; the pack
/// configuration file is embedded with its download base rewritten to
/// `file://binaries`. Symbolic links are stored as links, never
/// dereferenced.
///
/// `binary_path` is expected to be fully populated before this is called;
/// packaging itself performs no downloads.
///
/// # Errors
///
/// Fails if the inputs are missing, the archive cannot be written, or the
/// configuration file cannot be read and rewritten.
pub fn build_bundle(
    binary_path: &Path,
    pack_root: &Path,
    dest_dir: &Path,
    layout: &BundleLayout,
) -> BundleResult<BundleBuildResult> {
    if !binary_path.is_dir() {
        return Err(BundleError::InvalidPath(format!(
            "binary path does not exist: {}",
            binary_path.display()
        )));
    }
    if !pack_root.is_dir() {
        return Err(BundleError::InvalidPath(format!(
            "pack root does not exist: {}",
            pack_root.display()
        )));
    }

    fs::create_dir_all(dest_dir).map_err(|e| BundleError::CreateDirFailed {
        path: dest_dir.to_path_buf(),
        source: e,
    })?;

    let archive_name = bundle_filename(&layout.name, &Utc::now());
    let archive_path = dest_dir.join(&archive_name);

    let file = File::create(&archive_path).map_err(|e| BundleError::WriteFailed {
        path: archive_path.clone(),
        source: e,
    })?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let config_src = pack_root.join(&layout.config_file);
    let mut entries = 0usize;

    // Artifact tree under the fixed top-level name.
    entries += add_tree(&mut zip, binary_path, ARTIFACT_DIR, options, None)?;

    // The pack's own support directories, minus the config file which is
    // embedded separately in rewritten form.
    for dir in &layout.support_dirs {
        let src = pack_root.join(dir);
        if !src.is_dir() {
            tracing::warn!(dir = dir.as_str(), "support directory missing, skipped");
            continue;
        }
        entries += add_tree(&mut zip, &src, dir, options, Some(&config_src))?;
    }

    let config_text = fs::read_to_string(&config_src).map_err(|e| BundleError::ReadFailed {
        path: config_src.clone(),
        source: e,
    })?;
    let rewritten = rewrite_base_url(&config_text, &local_base_url())?;

    zip.start_file(layout.config_file.to_string_lossy().to_string(), options)
        .map_err(|e| BundleError::ArchiveFailed(e.to_string()))?;
    zip.write_all(rewritten.as_bytes())
        .map_err(|e| BundleError::WriteFailed {
            path: archive_path.clone(),
            source: e,
        })?;
    entries += 1;

    zip.finish()
        .map_err(|e| BundleError::ArchiveFailed(e.to_string()))?;

    let size = fs::metadata(&archive_path)
        .map_err(|e| BundleError::ReadFailed {
            path: archive_path.clone(),
            source: e,
        })?
        .len();

    tracing::info!(
        archive = %archive_path.display(),
        entries,
        size,
        "bundle written"
    );

    Ok(BundleBuildResult {
        archive_path,
        entries,
        size,
    })
}

/// Add a directory tree to the archive under `prefix`.
///
/// Returns the number of file and symlink entries added. `exclude` names
/// one path to leave out (the config file, embedded separately).
fn add_tree(
    zip: &mut ZipWriter<File>,
    src: &Path,
    prefix: &str,
    options: SimpleFileOptions,
    exclude: Option<&Path>,
) -> BundleResult<usize> {
    let mut entries = 0usize;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| BundleError::ReadFailed {
            path: src.to_path_buf(),
            source: e.into(),
        })?;

        let path = entry.path();
        if exclude.is_some_and(|excluded| path == excluded) {
            continue;
        }

        let rel = path
            .strip_prefix(src)
            .map_err(|_| BundleError::InvalidPath(format!("not under {}: {}", src.display(), path.display())))?;
        let name = format!("{}/{}", prefix, rel.to_string_lossy());

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            // Store the link itself: target path as body, symlink mode on
            // the entry.
            let target = fs::read_link(path).map_err(|e| BundleError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
            zip.add_symlink(name, target.to_string_lossy().to_string(), options)
                .map_err(|e| BundleError::ArchiveFailed(e.to_string()))?;
            entries += 1;
        } else if file_type.is_dir() {
            zip.add_directory(name, options)
                .map_err(|e| BundleError::ArchiveFailed(e.to_string()))?;
        } else {
            zip.start_file(name, options)
                .map_err(|e| BundleError::ArchiveFailed(e.to_string()))?;
            let body = fs::read(path).map_err(|e| BundleError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
            zip.write_all(&body)
                .map_err(|e| BundleError::ArchiveFailed(e.to_string()))?;
            entries += 1;
        }
    }

    Ok(entries)
}
