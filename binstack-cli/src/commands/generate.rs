//! The `generate` command: scan a tree and emit an index.

use std::path::PathBuf;

use binstack::index::IndexBuilder;

use crate::error::CliError;

use super::load_config;

/// Run the generate command.
///
/// Flags override the configured base URL and stack; the index goes to
/// `index_path` as a file, or to stdout when no path is given.
pub fn run(
    binary_path: PathBuf,
    base_url: Option<String>,
    stack: Option<String>,
    index_path: Option<PathBuf>,
    all: bool,
) -> Result<(), CliError> {
    let mut config = load_config();
    if let Some(base_url) = base_url {
        config.repository.base_url = base_url;
    }
    if let Some(stack) = stack {
        config.repository.stack = stack;
    }

    let index = IndexBuilder::new(&binary_path, config.url_base())
        .include_all(all)
        .build()?;

    match index_path {
        Some(path) => {
            index.write(&path)?;
            println!(
                "Wrote index of {} packages ({} artifacts) to {}",
                index.package_count(),
                index.artifact_count(),
                path.display()
            );
        }
        None => println!("{}", index.to_json_pretty()?),
    }

    Ok(())
}
