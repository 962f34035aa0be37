//! Shared test helpers for `calpresence-core` integration tests.
//!
//! In-memory mocks for every availability port plus a harness that wires
//! them into an `AvailabilityService` with a frozen clock.
#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;

use std::sync::Arc;

use calpresence_core::{AvailabilityService, FixedClock};
use calpresence_domain::{PluginConfig, SyncConfig};
use chrono::{DateTime, Utc};

pub use fixtures::*;
pub use mocks::*;

/// Service under test together with handles on its mocks
pub struct Harness {
    pub service: AvailabilityService,
    pub store: Arc<MockUserStore>,
    pub remote: Arc<MockRemoteCalendar>,
    pub presence: Arc<MockPresence>,
    pub notifier: Arc<MockNotifier>,
    pub confirmations: Arc<MockConfirmationStore>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new(now: DateTime<Utc>) -> Self {
        let store = Arc::new(MockUserStore::default());
        let remote = Arc::new(MockRemoteCalendar::default());
        let presence = Arc::new(MockPresence::default());
        let notifier = Arc::new(MockNotifier::default());
        let confirmations = Arc::new(MockConfirmationStore::default());
        let clock = Arc::new(FixedClock::new(now));

        let service = AvailabilityService::new(
            remote.clone(),
            store.clone(),
            presence.clone(),
            notifier.clone(),
            confirmations.clone(),
        )
        .with_clock(clock.clone())
        .with_sync_config(SyncConfig::default())
        .with_plugin_config(PluginConfig {
            plugin_url_path: "/plugins/com.mattermost.mscalendar".to_string(),
        });

        Self { service, store, remote, presence, notifier, confirmations, clock }
    }
}
