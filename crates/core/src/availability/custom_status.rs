//! Custom status reconciliation from the calendar view

use calpresence_domain::{CalendarView, CustomStatus, Result, User};
use tracing::debug;

use super::service::{AvailabilityService, StatusUpdate};
use super::state::{busy_events, has_overlapping_events};

impl AvailabilityService {
    /// Set or clear the "in a meeting" custom status of `user`.
    ///
    /// A custom status the user set themselves is never overwritten.
    pub(super) async fn set_custom_status_from_calendar_view(
        &self,
        user: &mut User,
        view: &CalendarView,
    ) -> Result<StatusUpdate> {
        if !user.settings.set_custom_status {
            return Ok(StatusUpdate::unchanged("User don't want to set custom status"));
        }

        let events = busy_events(&view.events);
        let Some(earliest) = events.first() else {
            if user.is_custom_status_set {
                self.presence.clear_custom_status(&user.mattermost_user_id).await?;
                self.store_custom_status_flag(user, false).await?;
            }
            return Ok(StatusUpdate::unchanged("No event present to set custom status"));
        };

        if has_overlapping_events(&events) {
            return Ok(StatusUpdate::unchanged("Overlapping events, not setting a custom status"));
        }
        if earliest.is_cancelled {
            return Ok(StatusUpdate::unchanged("Event cancelled, not setting custom status"));
        }
        if !earliest.has_attendees() {
            return Ok(StatusUpdate::unchanged("No attendee present, not setting custom status"));
        }

        let current = self.presence.get_custom_status(&user.mattermost_user_id).await?;
        if current.is_some() && !user.is_custom_status_set {
            return Ok(StatusUpdate::unchanged(
                "User already have a custom status set, ignoring custom status change",
            ));
        }

        let status = CustomStatus::meeting(earliest.end);
        debug!(user_id = %user.mattermost_user_id, expires_at = %earliest.end, "setting custom status");
        self.presence.set_custom_status(&user.mattermost_user_id, &status).await?;
        self.store_custom_status_flag(user, true).await?;
        Ok(StatusUpdate::changed(String::new()))
    }

    async fn store_custom_status_flag(&self, user: &mut User, is_set: bool) -> Result<()> {
        user.is_custom_status_set = is_set;
        self.store.store_user_custom_status_updates(&user.mattermost_user_id, is_set).await
    }
}
