//! Logging bootstrap.
//!
//! All library diagnostics go through `tracing`; the CLI calls
//! [`init_logging`] once at startup. The filter comes from `RUST_LOG` and
//! defaults to `info`, which gives the one-line-per-download output the
//! fetch engine emits.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
