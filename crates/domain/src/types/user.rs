//! Connected user types
//!
//! A user links a chat account to a remote calendar account and carries the
//! state the reconciler needs between cycles.

use serde::{Deserialize, Serialize};

use super::event::EventFingerprint;
use super::status::PresenceStatus;
use crate::impl_status_conversions;

/// Which presence the user wants while busy in their calendar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusOption {
    #[default]
    NotSet,
    Dnd,
    Away,
}

impl_status_conversions!(StatusOption {
    NotSet => "not_set",
    Dnd => "dnd",
    Away => "away",
});

impl StatusOption {
    /// Presence applied while busy, `None` when status updates are off.
    pub fn busy_status(self) -> Option<PresenceStatus> {
        match self {
            Self::NotSet => None,
            Self::Dnd => Some(PresenceStatus::Dnd),
            Self::Away => Some(PresenceStatus::Away),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub update_status_from_options: StatusOption,
    /// Ask via direct message instead of changing presence directly.
    pub get_confirmation: bool,
    pub set_custom_status: bool,
    pub receive_reminders: bool,
}

impl Settings {
    pub fn updates_status(&self) -> bool {
        self.update_status_from_options != StatusOption::NotSet
    }

    /// Whether the user takes part in status sync at all.
    pub fn needs_sync(&self) -> bool {
        self.updates_status() || self.receive_reminders || self.set_custom_status
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
}

/// Connected user as persisted in the user store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub mattermost_user_id: String,
    pub remote: RemoteUser,
    #[serde(default)]
    pub settings: Settings,
    /// Presence to restore once the meeting ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<PresenceStatus>,
    /// Fingerprints of the events currently keeping the user busy.
    #[serde(default)]
    pub active_events: Vec<EventFingerprint>,
    /// The current custom status was set by the sync, not by the user.
    #[serde(default)]
    pub is_custom_status_set: bool,
}

impl User {
    pub fn new(mattermost_user_id: impl Into<String>, remote_id: impl Into<String>) -> Self {
        Self {
            mattermost_user_id: mattermost_user_id.into(),
            remote: RemoteUser { id: remote_id.into(), user_principal_name: None },
            ..Self::default()
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn short(&self) -> UserShort {
        UserShort {
            mattermost_user_id: self.mattermost_user_id.clone(),
            remote_id: self.remote.id.clone(),
            email: self.remote.user_principal_name.clone().unwrap_or_default(),
        }
    }
}

/// Entry of the connected-user index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserShort {
    pub mattermost_user_id: String,
    pub remote_id: String,
    #[serde(default)]
    pub email: String,
}

pub type UserIndex = Vec<UserShort>;
