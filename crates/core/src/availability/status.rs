//! Presence reconciliation from the calendar view

use calpresence_domain::{
    CalendarSyncError, CalendarView, Event, PendingConfirmation, PresenceStatus, Result,
    StatusTransition as Transition, User, UserStatus,
};
use tracing::debug;

use super::service::{AvailabilityService, StatusUpdate};
use super::state::{active_fingerprints, busy_events, has_overlapping_events, CalendarState};
use super::views;

impl AvailabilityService {
    /// Decide and apply the next presence of `user` for this cycle.
    pub(super) async fn set_status_from_calendar_view(
        &self,
        user: &mut User,
        status: &UserStatus,
        view: &CalendarView,
    ) -> Result<StatusUpdate> {
        let Some(busy_status) = user.settings.update_status_from_options.busy_status() else {
            return Ok(StatusUpdate::unchanged("No value set from options to update status"));
        };
        let current = status.status;

        if current == PresenceStatus::Offline && !user.settings.get_confirmation {
            return Ok(StatusUpdate::unchanged(
                "User offline and does not want status change confirmations. No status change",
            ));
        }

        let stored = CalendarState::from_active_events(&user.active_events);
        let events = busy_events(&view.events);
        if events.is_empty() {
            return self.transition_to_free(user, status, &stored, busy_status).await;
        }

        if has_overlapping_events(&events) {
            return Ok(StatusUpdate::unchanged("Overlapping events, not updating status"));
        }

        if !events[0].has_attendees() {
            return Ok(StatusUpdate::unchanged("No attendee present, not updating status"));
        }

        let fingerprints = active_fingerprints(&events);
        if fingerprints.is_empty() {
            // Every busy event was cancelled.
            return self.transition_to_free(user, status, &stored, busy_status).await;
        }
        let next = CalendarState::Busy(fingerprints);

        match stored {
            CalendarState::Free => {
                if current == busy_status {
                    user.last_status = status.manual.then_some(current);
                    self.store.store_user(user).await?;
                    self.store_active_events(user, &next).await?;
                    return Ok(StatusUpdate::unchanged(
                        "User was already marked as busy. No status change.",
                    ));
                }

                self.set_status_or_ask_user(user, status, &events, Transition::ToBusy).await?;
                self.store_active_events(user, &next).await?;
                Ok(StatusUpdate::changed(format!(
                    "User was free, but is now busy ({busy_status}). Set status to busy ({busy_status})."
                )))
            }
            busy if busy == next => Ok(StatusUpdate::unchanged(format!(
                "No change in active events. Total number of events: {}",
                events.len()
            ))),
            CalendarState::Busy(_) => {
                let mut update = StatusUpdate::unchanged("User is already busy. No status change.");
                if current != busy_status {
                    self.set_status_or_ask_user(user, status, &events, Transition::ToBusy)
                        .await?;
                    update = StatusUpdate::changed(format!(
                        "User was free, but is now busy. Set status to busy ({busy_status})."
                    ));
                }
                self.store_active_events(user, &next).await?;
                Ok(update)
            }
        }
    }

    async fn transition_to_free(
        &self,
        user: &mut User,
        status: &UserStatus,
        stored: &CalendarState,
        busy_status: PresenceStatus,
    ) -> Result<StatusUpdate> {
        if stored.is_free() {
            return Ok(StatusUpdate::unchanged("No events in local or remote. No status change."));
        }

        let mut update = StatusUpdate::unchanged(format!(
            "User is no longer busy in calendar, but is not set to busy ({busy_status}). No status change."
        ));
        if status.status == busy_status {
            let message = match user.last_status {
                Some(previous) => format!(
                    "User is no longer busy in calendar. Set status to previous status ({previous})"
                ),
                None => "User is no longer busy in calendar. Set status to online.".to_string(),
            };
            self.set_status_or_ask_user(user, status, &[], Transition::ToFree).await?;
            update = StatusUpdate::changed(message);
        }

        self.store_active_events(user, &CalendarState::Free).await?;
        Ok(update)
    }

    /// Change presence directly, or ask the user first when they opted in.
    ///
    /// The user record is persisted before either path so `last_status`
    /// survives an unanswered confirmation.
    async fn set_status_or_ask_user(
        &self,
        user: &mut User,
        current: &UserStatus,
        events: &[&Event],
        transition: Transition,
    ) -> Result<()> {
        let to_set = match transition {
            Transition::ToFree => user.last_status.take().unwrap_or(PresenceStatus::Online),
            Transition::ToBusy => {
                let busy = user
                    .settings
                    .update_status_from_options
                    .busy_status()
                    .unwrap_or(PresenceStatus::Dnd);
                if !user.settings.get_confirmation {
                    user.last_status = current.manual.then_some(current.status);
                }
                busy
            }
        };

        self.store.store_user(user).await?;

        if !user.settings.get_confirmation {
            debug!(user_id = %user.mattermost_user_id, status = %to_set, "updating presence");
            return self.presence.set_status(&user.mattermost_user_id, to_set).await;
        }

        let prompt =
            views::render_status_change_prompt(events, to_set, &self.plugin_config.plugin_url_path);
        self.notifier.send_direct_message_with_attachment(&user.mattermost_user_id, &prompt).await?;
        self.confirmations
            .store_pending(&PendingConfirmation {
                mattermost_user_id: user.mattermost_user_id.clone(),
                requested_status: to_set,
                transition,
                event_subjects: events.iter().map(|e| e.subject.clone()).collect(),
                created_at: self.clock.now(),
            })
            .await
    }

    async fn store_active_events(&self, user: &mut User, state: &CalendarState) -> Result<()> {
        user.active_events = state.active_events();
        self.store
            .store_user_active_events(&user.mattermost_user_id, &user.active_events)
            .await
            .map_err(|e: CalendarSyncError| {
                e.context(format!(
                    "error in storing active events for user {}",
                    user.mattermost_user_id
                ))
            })
    }
}
