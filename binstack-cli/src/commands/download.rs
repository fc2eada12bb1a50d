//! The `download` command: materialize an index into a local tree.

use std::path::PathBuf;

use binstack::fetch::FetchOutcome;
use binstack::index::{ArtifactIndex, LATEST_INDEX_FILENAME};

use crate::error::CliError;

use super::{fetch_engine, load_config};

/// Run the download command.
///
/// Individual artifact failures are reported but do not fail the command;
/// only process-level failures produce a nonzero exit.
pub fn run(binary_path: PathBuf, index_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config();
    let index_path = index_path.unwrap_or_else(|| binary_path.join(LATEST_INDEX_FILENAME));

    let index = ArtifactIndex::load(&index_path)?;
    println!(
        "Fetching {} artifacts from {}",
        index.artifact_count(),
        index_path.display()
    );

    let engine = fetch_engine(&config)?;
    let report = engine.fetch_all(&binary_path, &index)?;

    println!(
        "Downloaded {} of {} artifacts into {}",
        report.completed(),
        report.total(),
        binary_path.display()
    );

    for failure in report.failures() {
        if let FetchOutcome::Failed { reason } = &failure.outcome {
            println!("  failed: {} ({})", failure.url, reason);
        }
    }

    Ok(())
}
