//! # Calendar Presence Infrastructure
//!
//! Infrastructure implementations of core ports and process setup.
//!
//! This crate contains:
//! - Configuration loading (environment variables, TOML/JSON files)
//! - Logging setup for `tracing`
//! - In-memory store for pending status-change confirmations
//! - Conversions from external errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `calpresence-core`
//! - Depends on `calpresence-domain` and `calpresence-core`
//! - Contains all "impure" code (I/O, environment, global subscribers)

pub mod config;
pub mod confirmations;
pub mod errors;
pub mod observability;

// Re-export commonly used items
pub use confirmations::{ConfirmationCacheConfig, PendingConfirmationCache};
pub use errors::InfraError;
pub use observability::init_logging;
