//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for calendar presence sync
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CalendarSyncError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Remote calendar error: {0}")]
    Remote(String),

    #[error("Presence error: {0}")]
    Presence(String),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CalendarSyncError {
    /// Stable label for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Remote(_) => "remote",
            Self::Presence(_) => "presence",
            Self::Notify(_) => "notify",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Wrap the error message with additional context, keeping the variant.
    #[must_use]
    pub fn context(self, context: impl std::fmt::Display) -> Self {
        let wrap = |msg: String| format!("{context}: {msg}");
        match self {
            Self::Store(m) => Self::Store(wrap(m)),
            Self::Remote(m) => Self::Remote(wrap(m)),
            Self::Presence(m) => Self::Presence(wrap(m)),
            Self::Notify(m) => Self::Notify(wrap(m)),
            Self::Config(m) => Self::Config(wrap(m)),
            Self::NotFound(m) => Self::NotFound(wrap(m)),
            Self::InvalidInput(m) => Self::InvalidInput(wrap(m)),
            Self::Internal(m) => Self::Internal(wrap(m)),
        }
    }
}

/// Result type alias for calendar presence operations
pub type Result<T> = std::result::Result<T, CalendarSyncError>;
