//! CLI command implementations.
//!
//! Each command resolves its inputs from flags first and the configuration
//! file second, then drives the library. User-facing output goes through
//! `println!`; diagnostics go through `tracing`.

pub mod download;
pub mod generate;
pub mod list;
pub mod zip;

use std::time::Duration;

use binstack::config::ConfigFile;
use binstack::fetch::{FetchEngine, FetchError, ReqwestClient};

use crate::error::CliError;

/// Load config or fall back to defaults.
fn load_config() -> ConfigFile {
    ConfigFile::load().unwrap_or_default()
}

/// Build the production fetch engine from configuration.
fn fetch_engine(config: &ConfigFile) -> Result<FetchEngine<ReqwestClient>, CliError> {
    let client = ReqwestClient::with_timeout(Duration::from_secs(config.download.timeout_secs))
        .map_err(FetchError::from)?;

    Ok(FetchEngine::with_client(client).with_concurrency(config.download.concurrency))
}
