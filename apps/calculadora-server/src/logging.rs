//! Tracing subscriber setup.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Filter directive for the given config level and `-v` count.
///
/// `-v` selects info, `-vv` debug, `-vvv` and above trace; without `-v`
/// the configured level is used as is.
#[must_use]
pub fn effective_level(configured: &str, verbose: u8) -> &str {
    match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `logging.level` and `-v`.
///
/// # Errors
/// Returns an error if the filter directive is invalid or a global
/// subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(effective_level(&cfg.level, verbose))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match cfg.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
