//! Tracing subscriber setup.
//!
//! Called once from `main` with the loaded [`Config`]. A second call fails
//! instead of silently replacing the global subscriber.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` directives win over `config.log_level`; `LOG_FORMAT=json`
/// switches to newline-delimited JSON output.
///
/// # Errors
///
/// Returns an error if the log level cannot be parsed or a subscriber is
/// already installed.
pub fn init(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.log_format == "json" {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.with_target(false).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Tracing already initialized: {e}"))
}
