//! Conversions from external infrastructure errors into domain errors.

use calpresence_domain::CalendarSyncError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct InfraError(pub CalendarSyncError);

impl From<InfraError> for CalendarSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CalendarSyncError> for InfraError {
    fn from(value: CalendarSyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCalendarSyncError {
    fn into_domain(self) -> CalendarSyncError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → CalendarSyncError */
/* -------------------------------------------------------------------------- */

impl IntoCalendarSyncError for std::io::Error {
    fn into_domain(self) -> CalendarSyncError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => CalendarSyncError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                CalendarSyncError::Config(format!("permission denied: {self}"))
            }
            _ => CalendarSyncError::Internal(format!("i/o failure: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → CalendarSyncError */
/* -------------------------------------------------------------------------- */

impl IntoCalendarSyncError for toml::de::Error {
    fn into_domain(self) -> CalendarSyncError {
        CalendarSyncError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → CalendarSyncError */
/* -------------------------------------------------------------------------- */

impl IntoCalendarSyncError for serde_json::Error {
    fn into_domain(self) -> CalendarSyncError {
        use serde_json::error::Category;

        match self.classify() {
            Category::Io => CalendarSyncError::Internal(format!("JSON i/o failure: {self}")),
            Category::Syntax | Category::Data | Category::Eof => {
                CalendarSyncError::Config(format!("Invalid JSON format: {self}"))
            }
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_domain())
    }
}
