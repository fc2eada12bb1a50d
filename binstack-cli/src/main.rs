//! Binstack CLI - command-line interface for the artifact repository tool.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "binstack",
    version,
    about = "Versioned binary artifact repositories for build packs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan a binary tree and emit a JSON index of download URLs
    Generate {
        /// Root of the package/version/file tree
        binary_path: PathBuf,

        /// Download base URL (defaults to the configured one)
        #[arg(long)]
        base_url: Option<String>,

        /// Stack identifier appended to the base URL
        #[arg(long)]
        stack: Option<String>,

        /// Write the index to this file instead of stdout
        #[arg(long)]
        index: Option<PathBuf>,

        /// Index every version instead of only the latest per major.minor family
        #[arg(long)]
        all: bool,
    },

    /// Download every artifact of an index into a local tree
    Download {
        /// Root of the local cache to populate
        binary_path: PathBuf,

        /// Index file to read (default: <binary_path>/index-latest.json)
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Package a populated tree plus pack support files into one archive
    Zip {
        /// Already-populated binary tree to package
        #[arg(long, conflicts_with = "index", required_unless_present = "index")]
        binary_path: Option<PathBuf>,

        /// Index to download into a scratch directory before packaging
        #[arg(long)]
        index: Option<PathBuf>,

        /// Directory to write the archive into
        #[arg(long, default_value = ".")]
        zip_path: PathBuf,
    },

    /// List packages, families and latest versions in a binary tree
    List {
        /// Root of the package/version/file tree
        binary_path: PathBuf,

        /// Restrict the listing to one package
        #[arg(long)]
        package: Option<String>,
    },
}

fn main() -> ExitCode {
    binstack::logging::init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            binary_path,
            base_url,
            stack,
            index,
            all,
        } => commands::generate::run(binary_path, base_url, stack, index, all),
        Commands::Download { binary_path, index } => commands::download::run(binary_path, index),
        Commands::Zip {
            binary_path,
            index,
            zip_path,
        } => commands::zip::run(binary_path, index, zip_path),
        Commands::List {
            binary_path,
            package,
        } => commands::list::run(binary_path, package),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
