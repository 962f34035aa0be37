//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CALENDAR_VIEW_WINDOW_MINUTES, DEFAULT_LOG_TRUNCATE_LIMIT, DEFAULT_SYNC_INTERVAL_SECS,
    DEFAULT_UPCOMING_EVENT_NOTIFICATION_MINUTES, UPCOMING_EVENT_WINDOW_DENOMINATOR,
    UPCOMING_EVENT_WINDOW_NUMERATOR,
};
use crate::errors::{CalendarSyncError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub plugin: PluginConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Status sync job configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How often the scheduler triggers a sync cycle.
    pub interval_seconds: u64,
    /// Width of the calendar window fetched per user, starting now.
    pub calendar_view_window_minutes: i64,
    /// Lead time of upcoming-event reminders.
    pub upcoming_event_notification_minutes: i64,
    /// Warnings per category per cycle before logs are truncated.
    pub log_truncate_limit: usize,
}

impl SyncConfig {
    /// Longest accepted sync interval (one day)
    pub const MAX_INTERVAL_SECONDS: u64 = 86_400;
    /// Longest accepted calendar window or reminder lead time (one day)
    pub const MAX_WINDOW_MINUTES: i64 = 1_440;

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// # Errors
    /// Returns `CalendarSyncError::Config` for a non-positive or unrepresentable window.
    pub fn calendar_view_window(&self) -> Result<chrono::Duration> {
        if self.calendar_view_window_minutes <= 0 {
            return Err(CalendarSyncError::Config(format!(
                "calendar view window must be positive, got {} minutes",
                self.calendar_view_window_minutes
            )));
        }
        minutes(self.calendar_view_window_minutes, "calendar view window")
    }

    /// # Errors
    /// Returns `CalendarSyncError::Config` for an unrepresentable lead time.
    pub fn upcoming_event_notification_time(&self) -> Result<chrono::Duration> {
        minutes(self.upcoming_event_notification_minutes, "reminder lead time")
    }

    /// Tolerance band around the reminder mark: 110% of the sync interval.
    ///
    /// Wider than one interval so every event start lands in the band of at
    /// least one cycle.
    ///
    /// # Errors
    /// Returns `CalendarSyncError::Config` when the interval is too large.
    pub fn upcoming_event_notification_window(&self) -> Result<chrono::Duration> {
        self.interval()
            .checked_mul(UPCOMING_EVENT_WINDOW_NUMERATOR)
            .map(|d| d / UPCOMING_EVENT_WINDOW_DENOMINATOR)
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .ok_or_else(|| {
                CalendarSyncError::Config(format!(
                    "sync interval out of range: {} seconds",
                    self.interval_seconds
                ))
            })
    }

    /// Check every field against its accepted range.
    ///
    /// # Errors
    /// Returns `CalendarSyncError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !(1..=Self::MAX_INTERVAL_SECONDS).contains(&self.interval_seconds) {
            return Err(CalendarSyncError::Config(format!(
                "interval_seconds must be between 1 and {}, got {}",
                Self::MAX_INTERVAL_SECONDS,
                self.interval_seconds
            )));
        }
        if !(1..=Self::MAX_WINDOW_MINUTES).contains(&self.calendar_view_window_minutes) {
            return Err(CalendarSyncError::Config(format!(
                "calendar_view_window_minutes must be between 1 and {}, got {}",
                Self::MAX_WINDOW_MINUTES,
                self.calendar_view_window_minutes
            )));
        }
        if !(0..=Self::MAX_WINDOW_MINUTES).contains(&self.upcoming_event_notification_minutes) {
            return Err(CalendarSyncError::Config(format!(
                "upcoming_event_notification_minutes must be between 0 and {}, got {}",
                Self::MAX_WINDOW_MINUTES,
                self.upcoming_event_notification_minutes
            )));
        }
        Ok(())
    }
}

fn minutes(value: i64, what: &str) -> Result<chrono::Duration> {
    chrono::Duration::try_minutes(value)
        .ok_or_else(|| CalendarSyncError::Config(format!("{what} out of range: {value} minutes")))
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_SYNC_INTERVAL_SECS,
            calendar_view_window_minutes: DEFAULT_CALENDAR_VIEW_WINDOW_MINUTES,
            upcoming_event_notification_minutes: DEFAULT_UPCOMING_EVENT_NOTIFICATION_MINUTES,
            log_truncate_limit: DEFAULT_LOG_TRUNCATE_LIMIT,
        }
    }
}

/// Chat platform plugin settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// URL path the plugin's HTTP routes are mounted under, e.g.
    /// `/plugins/com.mattermost.mscalendar`.
    pub plugin_url_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
