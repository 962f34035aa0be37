//! Deterministic users and events for availability tests

use calpresence_domain::{
    Attendee, Event, EventFingerprint, Settings, ShowAs, StatusOption, User,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// 2024-03-05 10:00:00 UTC
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()
}

pub fn minutes(n: i64) -> Duration {
    Duration::minutes(n)
}

/// Busy meeting with two attendees
pub fn meeting(uid: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
    Event {
        ical_uid: uid.to_string(),
        subject: format!("Meeting {uid}"),
        start,
        end,
        show_as: ShowAs::Busy,
        is_cancelled: false,
        is_all_day: false,
        organizer: Some(Attendee::new("Organizer", "organizer@example.com")),
        attendees: vec![
            Attendee::new("Alice", "alice@example.com"),
            Attendee::new("Bob", "bob@example.com"),
        ],
        location: None,
        web_link: None,
    }
}

pub fn fingerprint(event: &Event) -> EventFingerprint {
    event.fingerprint()
}

pub fn status_user(id: &str, option: StatusOption) -> User {
    User::new(id, remote_id(id)).with_settings(Settings {
        update_status_from_options: option,
        ..Settings::default()
    })
}

pub fn custom_status_user(id: &str) -> User {
    User::new(id, remote_id(id))
        .with_settings(Settings { set_custom_status: true, ..Settings::default() })
}

pub fn reminder_user(id: &str) -> User {
    User::new(id, remote_id(id))
        .with_settings(Settings { receive_reminders: true, ..Settings::default() })
}

pub fn remote_id(mattermost_user_id: &str) -> String {
    format!("remote-{mattermost_user_id}")
}
