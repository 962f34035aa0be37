//! Upcoming-event reminders
//!
//! Reminders are best effort: a failure for one event never stops the
//! others, and nothing is deduplicated across cycles.

use std::collections::HashMap;

use calpresence_domain::{CalendarView, Event, User};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::service::AvailabilityService;
use super::views;
use crate::utils::log_limiter::LogLimiter;

impl AvailabilityService {
    pub(super) async fn deliver_reminders(&self, users: &[User], views: &[CalendarView]) {
        let to_notify: HashMap<&str, &User> = users
            .iter()
            .filter(|u| u.settings.receive_reminders)
            .map(|u| (u.remote.id.as_str(), u))
            .collect();
        if to_notify.is_empty() {
            return;
        }

        let (lead, window) = match (
            self.sync_config.upcoming_event_notification_time(),
            self.sync_config.upcoming_event_notification_window(),
        ) {
            (Ok(lead), Ok(window)) => (lead, window),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "invalid reminder window, skipping reminders");
                return;
            }
        };
        let Some(upcoming_time) = self.clock.now().checked_add_signed(lead) else {
            warn!("reminder lead time out of range, skipping reminders");
            return;
        };

        let mut logs = LogLimiter::new("reminders", self.sync_config.log_truncate_limit);
        for view in views {
            let Some(user) = to_notify.get(view.remote_user_id.as_str()) else {
                continue;
            };
            if let Some(error) = &view.error {
                logs.warn(format!(
                    "Error getting availability for {}. err={}",
                    user.mattermost_user_id, error.message
                ));
                continue;
            }

            self.notify_upcoming_events(&user.mattermost_user_id, &view.events, upcoming_time, window)
                .await;
        }
    }

    async fn notify_upcoming_events(
        &self,
        mattermost_user_id: &str,
        events: &[Event],
        upcoming_time: DateTime<Utc>,
        window: Duration,
    ) {
        let mut timezone: Option<String> = None;

        for event in events.iter().filter(|e| !e.is_cancelled) {
            let diff = event.start - upcoming_time;
            if diff >= window || diff <= -window {
                continue;
            }

            // Resolved at most once per user and cycle.
            let tz = match timezone.take() {
                Some(tz) => tz,
                None => match self.presence.get_timezone(mattermost_user_id).await {
                    Ok(tz) => tz,
                    Err(e) => {
                        warn!(mattermost_user_id, error = %e, "error getting timezone for reminders");
                        return;
                    }
                },
            };
            let tz = timezone.insert(tz);

            let message = match views::render_upcoming_event(event, tz) {
                Ok(message) => message,
                Err(e) => {
                    warn!(mattermost_user_id, error = %e, "error rendering upcoming event");
                    continue;
                }
            };
            if let Err(e) = self.notifier.send_direct_message(mattermost_user_id, &message).await {
                warn!(mattermost_user_id, error = %e, "error sending upcoming event reminder");
                continue;
            }
            debug!(mattermost_user_id, event = %event.ical_uid, "upcoming event reminder sent");
        }
    }
}
