//! Counter-with-cutoff for warnings emitted inside per-user loops
//!
//! A sync cycle can hit the same failure for every connected user. The
//! limiter lets the first `limit` warnings through, emits one truncation
//! notice, and drops the rest.

use std::fmt;

use calpresence_domain::constants::LOG_TRUNCATE_MSG;
use tracing::warn;

/// What the limiter decided for one warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDecision {
    Emit,
    Truncate,
    Suppress,
}

#[derive(Debug)]
pub struct LogLimiter {
    category: &'static str,
    limit: usize,
    seen: usize,
}

impl LogLimiter {
    pub fn new(category: &'static str, limit: usize) -> Self {
        Self { category, limit, seen: 0 }
    }

    /// Count one warning and decide what to do with it.
    pub fn admit(&mut self) -> LogDecision {
        let decision = match self.seen.cmp(&self.limit) {
            std::cmp::Ordering::Less => LogDecision::Emit,
            std::cmp::Ordering::Equal => LogDecision::Truncate,
            std::cmp::Ordering::Greater => LogDecision::Suppress,
        };
        self.seen += 1;
        decision
    }

    pub fn warn(&mut self, message: impl fmt::Display) {
        match self.admit() {
            LogDecision::Emit => warn!(category = self.category, "{message}"),
            LogDecision::Truncate => warn!(category = self.category, "{LOG_TRUNCATE_MSG}"),
            LogDecision::Suppress => {}
        }
    }

    /// Warnings counted so far, including dropped ones.
    pub fn seen(&self) -> usize {
        self.seen
    }
}
