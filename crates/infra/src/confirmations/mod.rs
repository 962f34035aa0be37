//! Pending status-change confirmations with moka
//!
//! Holds the change each user was asked to confirm until they answer or the
//! entry expires. At most one pending change is kept per user; a newer prompt
//! replaces the older one.
//!
//! # Example
//!
//! ```rust,ignore
//! use calpresence_infra::{ConfirmationCacheConfig, PendingConfirmationCache};
//!
//! let confirmations = Arc::new(PendingConfirmationCache::new(ConfirmationCacheConfig::default()));
//! let service = AvailabilityService::new(remote, store, presence, notifier, confirmations);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use calpresence_core::ConfirmationStore;
use calpresence_domain::{PendingConfirmation, Result};
use moka::sync::Cache;

/// Default TTL for pending confirmations (1 hour)
pub const DEFAULT_CONFIRMATION_TTL_SECONDS: u64 = 3600;

/// Default max number of pending confirmations
pub const DEFAULT_CONFIRMATION_MAX_CAPACITY: u64 = 10_000;

/// Pending confirmation cache configuration
#[derive(Debug, Clone)]
pub struct ConfirmationCacheConfig {
    /// How long an unanswered prompt stays actionable
    pub ttl: Duration,

    /// Maximum number of pending entries
    pub max_capacity: u64,
}

impl Default for ConfirmationCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_CONFIRMATION_TTL_SECONDS),
            max_capacity: DEFAULT_CONFIRMATION_MAX_CAPACITY,
        }
    }
}

impl ConfirmationCacheConfig {
    /// Create config with custom TTL (useful for testing)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, max_capacity: DEFAULT_CONFIRMATION_MAX_CAPACITY }
    }
}

/// In-memory `ConfirmationStore` keyed by chat user id
pub struct PendingConfirmationCache {
    cache: Cache<String, PendingConfirmation>,
}

impl PendingConfirmationCache {
    pub fn new(config: ConfirmationCacheConfig) -> Self {
        tracing::info!(
            ttl_seconds = config.ttl.as_secs(),
            max_capacity = config.max_capacity,
            "confirmation cache configuration loaded"
        );
        let cache =
            Cache::builder().max_capacity(config.max_capacity).time_to_live(config.ttl).build();
        Self { cache }
    }
}

impl Default for PendingConfirmationCache {
    fn default() -> Self {
        Self::new(ConfirmationCacheConfig::default())
    }
}

#[async_trait]
impl ConfirmationStore for PendingConfirmationCache {
    async fn store_pending(&self, confirmation: &PendingConfirmation) -> Result<()> {
        tracing::debug!(
            user_id = %confirmation.mattermost_user_id,
            status = %confirmation.requested_status,
            "storing pending confirmation"
        );
        self.cache.insert(confirmation.mattermost_user_id.clone(), confirmation.clone());
        Ok(())
    }

    async fn take_pending(&self, mattermost_user_id: &str) -> Result<Option<PendingConfirmation>> {
        // `get` honours the TTL; the entry is dropped either way.
        let pending = self.cache.get(mattermost_user_id);
        self.cache.invalidate(mattermost_user_id);
        Ok(pending)
    }
}
