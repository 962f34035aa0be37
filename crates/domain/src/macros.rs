//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Presence values and user options travel as lowercase strings between the
//! chat platform, the store and the reconciler. This macro keeps the string
//! mapping in one place.
//!
//! # Example
//!
//! ```rust
//! use calpresence_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Availability {
//!     Free,
//!     Busy,
//! }
//!
//! impl_status_conversions!(Availability {
//!     Free => "free",
//!     Busy => "busy",
//! });
//! ```

/// Implements Display and FromStr traits for string-backed enums
///
/// Parsing is case-insensitive; display is the canonical lowercase form.
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::errors::CalendarSyncError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::errors::CalendarSyncError::InvalidInput(format!(
                        "Invalid {}: {}",
                        stringify!($enum_name),
                        s
                    ))),
                }
            }
        }
    };
}
