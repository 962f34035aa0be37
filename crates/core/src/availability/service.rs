//! Availability reconciler - status sync business logic
//!
//! One sync cycle loads the connected users, fetches their calendar views in
//! a single batched call, then delivers reminders and reconciles presence and
//! custom status user by user.

use std::collections::HashMap;
use std::sync::Arc;

use calpresence_domain::{
    CalendarSyncError, CalendarView, CalendarViewRequest, PluginConfig, PresenceStatus, Result,
    StatusTransition, SyncConfig, SyncJobSummary, User, UserIndex, UserStatus,
};
use tracing::{debug, info, instrument};

use super::ports::{ConfirmationStore, Notifier, PresenceSink, RemoteCalendar, UserStore};
use super::views;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::log_limiter::LogLimiter;

/// Result of reconciling one user's presence or custom status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Human-readable outcome for this user
    pub message: String,
    /// Whether a status was written
    pub changed: bool,
}

impl StatusUpdate {
    pub(super) fn unchanged(message: impl Into<String>) -> Self {
        Self { message: message.into(), changed: false }
    }

    pub(super) fn changed(message: impl Into<String>) -> Self {
        Self { message: message.into(), changed: true }
    }
}

/// Availability reconciler
pub struct AvailabilityService {
    pub(super) remote: Arc<dyn RemoteCalendar>,
    pub(super) store: Arc<dyn UserStore>,
    pub(super) presence: Arc<dyn PresenceSink>,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) confirmations: Arc<dyn ConfirmationStore>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) sync_config: SyncConfig,
    pub(super) plugin_config: PluginConfig,
}

impl AvailabilityService {
    /// Create a reconciler with default configuration and the system clock
    pub fn new(
        remote: Arc<dyn RemoteCalendar>,
        store: Arc<dyn UserStore>,
        presence: Arc<dyn PresenceSink>,
        notifier: Arc<dyn Notifier>,
        confirmations: Arc<dyn ConfirmationStore>,
    ) -> Self {
        Self {
            remote,
            store,
            presence,
            notifier,
            confirmations,
            clock: Arc::new(SystemClock),
            sync_config: SyncConfig::default(),
            plugin_config: PluginConfig::default(),
        }
    }

    /// Replace the clock (frozen clocks in tests)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the sync windows and log limits
    pub fn with_sync_config(mut self, config: SyncConfig) -> Self {
        self.sync_config = config;
        self
    }

    /// Set the plugin routes used in confirmation prompts
    pub fn with_plugin_config(mut self, config: PluginConfig) -> Self {
        self.plugin_config = config;
        self
    }

    /// Run a sync cycle for a single connected user
    #[instrument(skip(self))]
    pub async fn sync(&self, mattermost_user_id: &str) -> Result<(String, SyncJobSummary)> {
        let entry = self.store.load_user_from_index(mattermost_user_id).await?;
        self.sync_users(vec![entry]).await
    }

    /// Run a sync cycle for every connected user
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> Result<(String, SyncJobSummary)> {
        let index = match self.store.load_user_index().await {
            Ok(index) => index,
            Err(CalendarSyncError::NotFound(_)) => {
                return Ok(("No users found in user index".to_string(), SyncJobSummary::default()))
            }
            Err(e) => return Err(e.context("not able to load the users from user index")),
        };

        self.sync_users(index).await
    }

    /// Fetch the calendar views of `users` for the upcoming window
    pub async fn get_calendar_views(&self, users: &[User]) -> Result<Vec<CalendarView>> {
        let start = self.clock.now();
        let end = start.checked_add_signed(self.sync_config.calendar_view_window()?).ok_or_else(
            || CalendarSyncError::Config("calendar view window out of range".to_string()),
        )?;

        let requests: Vec<CalendarViewRequest> = users
            .iter()
            .map(|u| CalendarViewRequest { remote_user_id: u.remote.id.clone(), start, end })
            .collect();

        debug!(requests = requests.len(), "fetching calendar views");
        self.remote.batch_view_calendars(&requests).await
    }

    async fn sync_users(&self, index: UserIndex) -> Result<(String, SyncJobSummary)> {
        let mut summary = SyncJobSummary::default();
        if index.is_empty() {
            return Ok(("No connected users found".to_string(), summary));
        }
        summary.number_of_users_processed = index.len();

        let mut logs = LogLimiter::new("load_user", self.sync_config.log_truncate_limit);
        let mut users = Vec::new();
        for entry in &index {
            let user = match self.store.load_user(&entry.mattermost_user_id).await {
                Ok(user) => user,
                Err(e) => {
                    summary.number_of_users_failed_status_changed += 1;
                    logs.warn(format!(
                        "Not able to load user {} from user index. err={e}",
                        entry.mattermost_user_id
                    ));
                    continue;
                }
            };
            if user.settings.needs_sync() {
                users.push(user);
            }
        }
        if users.is_empty() {
            return Ok(("No users need to be synced".to_string(), summary));
        }

        let views = self
            .get_calendar_views(&users)
            .await
            .map_err(|e| e.context("not able to get calendar views for connected users"))?;
        if views.is_empty() {
            return Ok(("No calendar views found".to_string(), summary));
        }

        self.deliver_reminders(&users, &views).await;

        let outcome = self
            .set_user_statuses(users, &views)
            .await
            .map_err(|e| e.context("error setting the user statuses"))?;

        summary.number_of_users_failed_status_changed += outcome.failed;
        summary.number_of_users_status_changed = outcome.changed;

        info!(
            processed = summary.number_of_users_processed,
            changed = summary.number_of_users_status_changed,
            failed = summary.number_of_users_failed_status_changed,
            "status sync finished"
        );
        Ok((outcome.message, summary))
    }

    async fn set_user_statuses(
        &self,
        users: Vec<User>,
        views: &[CalendarView],
    ) -> Result<StatusesOutcome> {
        let mut outcome = StatusesOutcome::default();
        let mut to_update: HashMap<String, User> = users
            .into_iter()
            .filter(|u| u.settings.updates_status() || u.settings.set_custom_status)
            .map(|u| (u.remote.id.clone(), u))
            .collect();
        if to_update.is_empty() {
            outcome.message = "No users want their status updated".to_string();
            return Ok(outcome);
        }

        let ids: Vec<String> = to_update.values().map(|u| u.mattermost_user_id.clone()).collect();
        let statuses: HashMap<String, UserStatus> = self
            .presence
            .get_statuses(&ids)
            .await
            .map_err(|e| e.context("error in getting user statuses for connected users"))?
            .into_iter()
            .map(|s| (s.user_id.clone(), s))
            .collect();

        let mut logs = LogLimiter::new("set_status", self.sync_config.log_truncate_limit);
        let mut last_message = String::new();
        for view in views {
            let Some(user) = to_update.get_mut(&view.remote_user_id) else {
                continue;
            };
            if let Some(error) = &view.error {
                logs.warn(format!(
                    "Error getting availability for {}. err={}",
                    user.mattermost_user_id, error.message
                ));
                outcome.failed += 1;
                continue;
            }
            let Some(status) = statuses.get(&user.mattermost_user_id) else {
                continue;
            };

            let mut user_message = String::new();
            if user.settings.updates_status() {
                match self.set_status_from_calendar_view(user, status, view).await {
                    Ok(update) => {
                        if update.changed {
                            outcome.changed += 1;
                        }
                        user_message = update.message;
                    }
                    Err(e) => {
                        logs.warn(format!(
                            "Error setting user {} status. err={e}",
                            user.mattermost_user_id
                        ));
                        outcome.failed += 1;
                    }
                }
            }

            if user.settings.set_custom_status {
                match self.set_custom_status_from_calendar_view(user, view).await {
                    Ok(update) => {
                        // A user counts once even if both presence and custom status changed.
                        if update.changed && !user.settings.updates_status() {
                            outcome.changed += 1;
                        }
                        if user_message.is_empty() {
                            user_message = update.message;
                        }
                    }
                    Err(e) => {
                        logs.warn(format!(
                            "Error setting user {} custom status. err={e}",
                            user.mattermost_user_id
                        ));
                        outcome.failed += 1;
                    }
                }
            }

            if !user_message.is_empty() {
                last_message = user_message;
            }
        }

        outcome.message =
            if last_message.is_empty() { views::json_block(&views) } else { last_message };
        Ok(outcome)
    }

    /// Apply or drop a status change the user was asked to confirm.
    ///
    /// Returns the text to show the user.
    #[instrument(skip(self))]
    pub async fn resolve_confirmation(
        &self,
        mattermost_user_id: &str,
        accepted: bool,
    ) -> Result<String> {
        let pending = self.confirmations.take_pending(mattermost_user_id).await?.ok_or_else(|| {
            CalendarSyncError::NotFound(format!(
                "no pending status change for user {mattermost_user_id}"
            ))
        })?;

        if !accepted {
            info!(mattermost_user_id, "status change declined");
            return Ok("Your status will not be changed.".to_string());
        }

        let requested = pending.requested_status;
        if pending.transition == StatusTransition::ToBusy {
            let mut user = self.store.load_user(mattermost_user_id).await?;
            let current = self.presence.get_statuses(&[mattermost_user_id.to_string()]).await?;
            user.last_status = current
                .into_iter()
                .find(|s| s.user_id == mattermost_user_id && s.manual)
                .map(|s| s.status);
            self.store.store_user(&user).await?;
        }

        self.presence.set_status(mattermost_user_id, requested).await?;
        info!(mattermost_user_id, status = %requested, "confirmed status change applied");
        Ok(format!("Your status has been changed to {}.", pretty_status(requested)))
    }
}

#[derive(Debug, Default)]
struct StatusesOutcome {
    message: String,
    changed: usize,
    failed: usize,
}

fn pretty_status(status: PresenceStatus) -> &'static str {
    match status {
        PresenceStatus::Online => "online",
        PresenceStatus::Away => "away",
        PresenceStatus::Dnd => "do not disturb",
        PresenceStatus::Offline => "offline",
    }
}
