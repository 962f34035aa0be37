//! Shared utilities for the reconciler

pub mod clock;
pub mod log_limiter;

pub use clock::{Clock, FixedClock, SystemClock};
pub use log_limiter::{LogDecision, LogLimiter};
