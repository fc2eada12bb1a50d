//! The `zip` command: package a populated tree into a bundle archive.

use std::path::PathBuf;

use tempfile::TempDir;

use binstack::bundle::{build_bundle, BundleBuildResult};
use binstack::index::ArtifactIndex;

use crate::error::CliError;

use super::{fetch_engine, load_config};

/// Run the zip command.
///
/// With `--binary-path` the given tree is packaged as-is. With only
/// `--index`, every artifact is first downloaded into a scratch directory,
/// which is removed when the command finishes whether or not packaging
/// succeeded.
pub fn run(
    binary_path: Option<PathBuf>,
    index_path: Option<PathBuf>,
    zip_path: PathBuf,
) -> Result<(), CliError> {
    let config = load_config();
    let layout = config.bundle_layout();

    let result = match binary_path {
        Some(binary_path) => build_bundle(
            &binary_path,
            &config.bundle.pack_root,
            &zip_path,
            &layout,
        )?,
        None => {
            let index_path = index_path.ok_or_else(|| {
                CliError::Usage("either --binary-path or --index is required".to_string())
            })?;
            let index = ArtifactIndex::load(&index_path)?;

            // The scratch tree lives only as long as this binding; it is
            // removed on every exit path, packaging failures included.
            let scratch = TempDir::new()?;

            let engine = fetch_engine(&config)?;
            let report = engine.fetch_all(scratch.path(), &index)?;
            if report.has_failures() {
                println!(
                    "Warning: {} of {} artifacts failed to download",
                    report.failed(),
                    report.total()
                );
            }

            build_bundle(scratch.path(), &config.bundle.pack_root, &zip_path, &layout)?
        }
    };

    report_result(&result);
    Ok(())
}

fn report_result(result: &BundleBuildResult) {
    println!(
        "Wrote {} ({} entries, {} bytes)",
        result.archive_path.display(),
        result.entries,
        result.size
    );
}
