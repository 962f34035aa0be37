//! Presence and custom status values of the chat platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    MEETING_CUSTOM_STATUS_DURATION, MEETING_CUSTOM_STATUS_EMOJI, MEETING_CUSTOM_STATUS_TEXT,
};
use crate::impl_status_conversions;

/// Presence status of a chat user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Away,
    Dnd,
    Offline,
}

impl_status_conversions!(PresenceStatus {
    Online => "online",
    Away => "away",
    Dnd => "dnd",
    Offline => "offline",
});

/// Current presence of a user as reported by the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    pub user_id: String,
    pub status: PresenceStatus,
    /// Whether the user picked this status themselves.
    pub manual: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomStatus {
    pub emoji: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: String,
}

impl CustomStatus {
    /// The status shown while a meeting is in progress.
    pub fn meeting(expires_at: DateTime<Utc>) -> Self {
        Self {
            emoji: MEETING_CUSTOM_STATUS_EMOJI.to_string(),
            text: MEETING_CUSTOM_STATUS_TEXT.to_string(),
            expires_at: Some(expires_at),
            duration: MEETING_CUSTOM_STATUS_DURATION.to_string(),
        }
    }
}
