//! The `list` command: a read-only view over the catalog.

use std::path::PathBuf;

use binstack::catalog;

use crate::error::CliError;

/// Run the list command.
///
/// Prints each package with its major.minor families and the latest
/// version per family.
pub fn run(binary_path: PathBuf, package: Option<String>) -> Result<(), CliError> {
    let packages = match package {
        Some(package) => vec![package],
        None => catalog::list_packages(&binary_path)?,
    };

    for package in packages {
        let package_dir = binary_path.join(&package);
        println!("{}", package);

        let families = catalog::major_minor_families(&package_dir)?;
        if families.is_empty() {
            println!("  (no versions)");
            continue;
        }

        for family in families {
            let latest = catalog::latest_version(&package_dir, Some(family.as_str()))?;
            println!("  {} -> {}", family, latest);
        }
    }

    Ok(())
}
