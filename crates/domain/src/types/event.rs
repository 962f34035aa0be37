//! Calendar event types
//!
//! Events are immutable snapshots of the remote calendar fetched once per
//! sync cycle. Only their fingerprints are persisted.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// How the remote calendar displays the time slot of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShowAs {
    Free,
    Tentative,
    Busy,
    Oof,
    WorkingElsewhere,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddress {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email_address: EmailAddress,
}

impl Attendee {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { email_address: EmailAddress { name: name.into(), address: address.into() } }
    }
}

/// Remote calendar item within the fetched window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "iCalUId")]
    pub ical_uid: String,
    #[serde(default)]
    pub subject: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub show_as: ShowAs,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<Attendee>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

impl Event {
    /// Only events displayed as busy affect presence.
    pub fn is_busy(&self) -> bool {
        self.show_as == ShowAs::Busy
    }

    /// Events without attendees are unlikely to be meetings.
    pub fn has_attendees(&self) -> bool {
        !self.attendees.is_empty()
    }

    pub fn fingerprint(&self) -> EventFingerprint {
        EventFingerprint::new(&self.ical_uid, self.start)
    }
}

/// Identity of one occurrence of a (possibly recurring) meeting.
///
/// Recurring occurrences share an iCal UID, so the UTC start time is part of
/// the key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventFingerprint(String);

impl EventFingerprint {
    pub fn new(ical_uid: &str, start: DateTime<Utc>) -> Self {
        Self(format!("{} {}", ical_uid, start.to_rfc3339_opts(SecondsFormat::Secs, true)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EventFingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One entry of a batched calendar view request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarViewRequest {
    pub remote_user_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Error reported by the remote calendar for a single user of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    pub code: String,
    pub message: String,
}

/// Per-user result of a batched calendar view request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarView {
    pub remote_user_id: String,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RemoteError>,
}

impl CalendarView {
    pub fn ok(remote_user_id: impl Into<String>, events: Vec<Event>) -> Self {
        Self { remote_user_id: remote_user_id.into(), events, error: None }
    }

    pub fn failed(remote_user_id: impl Into<String>, code: &str, message: &str) -> Self {
        Self {
            remote_user_id: remote_user_id.into(),
            events: Vec::new(),
            error: Some(RemoteError { code: code.to_string(), message: message.to_string() }),
        }
    }
}
