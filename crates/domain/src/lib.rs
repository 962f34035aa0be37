//! # Calendar Presence Domain
//!
//! Business domain types for the calendar presence sync.
//!
//! This crate contains:
//! - Users, settings and the persisted sync state
//! - Calendar events, batched calendar views and event fingerprints
//! - Presence and custom status values
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
