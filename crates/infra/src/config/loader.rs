//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Searches multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CALPRESENCE_SYNC_INTERVAL`: Sync interval in seconds (required)
//! - `CALPRESENCE_PLUGIN_URL_PATH`: URL path of the plugin routes (required)
//! - `CALPRESENCE_CALENDAR_VIEW_WINDOW`: Calendar window in minutes
//! - `CALPRESENCE_REMINDER_LEAD_MINUTES`: Reminder lead time in minutes
//! - `CALPRESENCE_LOG_TRUNCATE_LIMIT`: Warnings per category before truncation
//! - `CALPRESENCE_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//! - `CALPRESENCE_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./config.toml` or `./config.json` (current working directory)
//! 2. `./calpresence.toml` or `./calpresence.json` (current working directory)
//! 3. `../config.toml` or `../config.json` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use calpresence_domain::{
    CalendarSyncError, Config, LoggingConfig, PluginConfig, Result, SyncConfig,
};

use crate::errors::InfraError;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CalendarSyncError::Config` if configuration cannot be loaded
/// from either source or the file is invalid.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Optional variables fall back to the defaults of [`Config`].
///
/// # Errors
/// Returns `CalendarSyncError::Config` if required variables are missing,
/// any variable has an invalid value, or a sync setting is out of range.
pub fn load_from_env() -> Result<Config> {
    let interval_seconds = env_parse::<u64>("CALPRESENCE_SYNC_INTERVAL", "sync interval")?;
    let plugin_url_path = env_var("CALPRESENCE_PLUGIN_URL_PATH")?;

    let defaults = SyncConfig::default();
    let sync = SyncConfig {
        interval_seconds,
        calendar_view_window_minutes: env_parse_or(
            "CALPRESENCE_CALENDAR_VIEW_WINDOW",
            "calendar view window",
            defaults.calendar_view_window_minutes,
        )?,
        upcoming_event_notification_minutes: env_parse_or(
            "CALPRESENCE_REMINDER_LEAD_MINUTES",
            "reminder lead time",
            defaults.upcoming_event_notification_minutes,
        )?,
        log_truncate_limit: env_parse_or(
            "CALPRESENCE_LOG_TRUNCATE_LIMIT",
            "log truncate limit",
            defaults.log_truncate_limit,
        )?,
    };

    let logging = LoggingConfig {
        level: std::env::var("CALPRESENCE_LOG_LEVEL")
            .unwrap_or_else(|_| LoggingConfig::default().level),
        json: env_bool("CALPRESENCE_LOG_JSON", false),
    };

    sync.validate()?;
    Ok(Config { sync, plugin: PluginConfig { plugin_url_path }, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CalendarSyncError::Config` if the file is missing, no file is
/// found when searching, the contents cannot be parsed, or a sync setting is
/// out of range.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CalendarSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            CalendarSyncError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| {
        CalendarSyncError::from(InfraError::from(e)).context("Failed to read config file")
    })?;

    let config = parse_config(&contents, &config_path)?;
    config.sync.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents).map_err(|e| InfraError::from(e).into()),
        _ => Err(CalendarSyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Search multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.extend(candidates_in(&cwd.join("..")));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("config.toml"),
        dir.join("config.json"),
        dir.join("calpresence.toml"),
        dir.join("calpresence.json"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CalendarSyncError::Config(format!("Missing required environment variable: {key}"))
    })
}

fn env_parse<T>(key: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key).and_then(|s| parse_value(&s, what))
}

fn env_parse_or<T>(key: &str, what: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(s) => parse_value(&s, what),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(raw: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| CalendarSyncError::Config(format!("Invalid {what}: {e}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
