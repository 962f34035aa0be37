//! Global `tracing` subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level so operators can
//! raise verbosity without touching the config file.

use calpresence_domain::{CalendarSyncError, LoggingConfig, Result};
use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` if set and valid, else `config.level`.
///
/// # Errors
/// Returns `CalendarSyncError::Config` if the configured level is not a
/// valid filter directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| {
        CalendarSyncError::Config(format!("Invalid log level '{}': {e}", config.level))
    })
}

/// Install the global subscriber.
///
/// # Errors
/// Returns `CalendarSyncError::Internal` if a global subscriber is already
/// installed, or `CalendarSyncError::Config` for an invalid level.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|e| CalendarSyncError::Internal(format!("logging already initialised: {e}")))?;

    tracing::debug!(level = %config.level, json = config.json, "logging initialised");
    Ok(())
}
