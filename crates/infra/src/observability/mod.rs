//! Observability infrastructure
//!
//! The reconciler logs through `tracing` with structured fields; this module
//! installs the process-wide subscriber that renders those events.

pub mod logging;

pub use logging::{build_filter, init_logging};
