//! Port interfaces for availability sync
//!
//! These traits define the boundaries between the reconciler and the remote
//! calendar, the user store, and the chat platform.

use async_trait::async_trait;
use calpresence_domain::{
    Attachment, CalendarView, CalendarViewRequest, CustomStatus, EventFingerprint,
    PendingConfirmation, PresenceStatus, Result, User, UserIndex, UserShort, UserStatus,
};

/// Trait for reading calendar views from the remote calendar
#[async_trait]
pub trait RemoteCalendar: Send + Sync {
    /// Fetch the calendar view of every requested user in one batched call.
    ///
    /// Per-user failures are reported in [`CalendarView::error`]; an `Err`
    /// means the batch itself could not be issued.
    async fn batch_view_calendars(
        &self,
        requests: &[CalendarViewRequest],
    ) -> Result<Vec<CalendarView>>;
}

/// Trait for persisting connected users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Load a user by chat user id
    async fn load_user(&self, mattermost_user_id: &str) -> Result<User>;

    /// Persist the whole user record
    async fn store_user(&self, user: &User) -> Result<()>;

    /// Load the index of all connected users.
    ///
    /// Returns `CalendarSyncError::NotFound` when no index exists yet.
    async fn load_user_index(&self) -> Result<UserIndex>;

    /// Load a single index entry by chat user id
    async fn load_user_from_index(&self, mattermost_user_id: &str) -> Result<UserShort>;

    /// Replace the fingerprints of the events keeping the user busy
    async fn store_user_active_events(
        &self,
        mattermost_user_id: &str,
        events: &[EventFingerprint],
    ) -> Result<()>;

    /// Record whether the current custom status was set by the sync
    async fn store_user_custom_status_updates(
        &self,
        mattermost_user_id: &str,
        is_custom_status_set: bool,
    ) -> Result<()>;
}

/// Trait for the chat platform's presence API
#[async_trait]
pub trait PresenceSink: Send + Sync {
    /// Presence of each listed user; unknown users are omitted
    async fn get_statuses(&self, mattermost_user_ids: &[String]) -> Result<Vec<UserStatus>>;

    /// Overwrite the presence of a user
    async fn set_status(&self, mattermost_user_id: &str, status: PresenceStatus) -> Result<()>;

    /// Current custom status, `None` when the user has none
    async fn get_custom_status(&self, mattermost_user_id: &str) -> Result<Option<CustomStatus>>;

    /// Set the custom status shown next to the user's name
    async fn set_custom_status(&self, mattermost_user_id: &str, status: &CustomStatus)
        -> Result<()>;

    /// Remove the user's custom status
    async fn clear_custom_status(&self, mattermost_user_id: &str) -> Result<()>;

    /// IANA timezone name of the user, e.g. `Europe/Berlin`
    async fn get_timezone(&self, mattermost_user_id: &str) -> Result<String>;
}

/// Trait for sending direct messages from the bot account
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a plain markdown message to the user
    async fn send_direct_message(&self, mattermost_user_id: &str, message: &str) -> Result<()>;

    /// Send a message carrying interactive buttons
    async fn send_direct_message_with_attachment(
        &self,
        mattermost_user_id: &str,
        attachment: &Attachment,
    ) -> Result<()>;
}

/// Trait for status changes awaiting the user's answer
#[async_trait]
pub trait ConfirmationStore: Send + Sync {
    /// Record a pending confirmation, replacing any earlier one for the user
    async fn store_pending(&self, confirmation: &PendingConfirmation) -> Result<()>;

    /// Remove and return the pending confirmation of a user
    async fn take_pending(&self, mattermost_user_id: &str)
        -> Result<Option<PendingConfirmation>>;
}
