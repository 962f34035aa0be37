//! Sync cycle outcome and deferred decision records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::PresenceStatus;

/// Aggregate outcome of one sync invocation. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncJobSummary {
    pub number_of_users_processed: usize,
    pub number_of_users_status_changed: usize,
    pub number_of_users_failed_status_changed: usize,
}

/// Direction of a presence change made by the sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTransition {
    /// A meeting started; the busy status is applied.
    ToBusy,
    /// The meeting ended; the previous status is restored.
    ToFree,
}

/// A status change the user was asked to confirm and has not answered yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub mattermost_user_id: String,
    pub requested_status: PresenceStatus,
    pub transition: StatusTransition,
    pub event_subjects: Vec<String>,
    pub created_at: DateTime<Utc>,
}
