//! In-memory port implementations
//!
//! Every mock records the calls the reconciler makes so tests can assert on
//! writes as well as on returned summaries.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use calpresence_core::{ConfirmationStore, Notifier, PresenceSink, RemoteCalendar, UserStore};
use calpresence_domain::{
    Attachment, CalendarSyncError, CalendarView, CalendarViewRequest, CustomStatus, Event,
    EventFingerprint, PendingConfirmation, PresenceStatus, Result as DomainResult, User,
    UserIndex, UserShort, UserStatus,
};

/// In-memory mock for `UserStore`.
#[derive(Default)]
pub struct MockUserStore {
    users: Mutex<HashMap<String, User>>,
    index: Mutex<Option<UserIndex>>,
    broken: Mutex<HashSet<String>>,
    writes: Mutex<Vec<String>>,
}

impl MockUserStore {
    /// Add a user and its index entry.
    pub fn insert(&self, user: User) {
        let mut index = self.index.lock().unwrap();
        index.get_or_insert_with(Vec::new).push(user.short());
        self.users.lock().unwrap().insert(user.mattermost_user_id.clone(), user);
    }

    /// Keep the index entry but make loading the user fail.
    pub fn break_user(&self, mattermost_user_id: &str) {
        self.broken.lock().unwrap().insert(mattermost_user_id.to_string());
    }

    pub fn set_index(&self, index: Option<UserIndex>) {
        *self.index.lock().unwrap() = index;
    }

    pub fn user(&self, mattermost_user_id: &str) -> User {
        self.users.lock().unwrap()[mattermost_user_id].clone()
    }

    /// Names of the write operations performed so far.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }

    fn record(&self, op: &str) {
        self.writes.lock().unwrap().push(op.to_string());
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn load_user(&self, mattermost_user_id: &str) -> DomainResult<User> {
        if self.broken.lock().unwrap().contains(mattermost_user_id) {
            return Err(CalendarSyncError::Store("corrupt record".to_string()));
        }
        self.users
            .lock()
            .unwrap()
            .get(mattermost_user_id)
            .cloned()
            .ok_or_else(|| CalendarSyncError::NotFound(mattermost_user_id.to_string()))
    }

    async fn store_user(&self, user: &User) -> DomainResult<()> {
        self.record("store_user");
        self.users.lock().unwrap().insert(user.mattermost_user_id.clone(), user.clone());
        Ok(())
    }

    async fn load_user_index(&self) -> DomainResult<UserIndex> {
        self.index
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CalendarSyncError::NotFound("user index".to_string()))
    }

    async fn load_user_from_index(&self, mattermost_user_id: &str) -> DomainResult<UserShort> {
        self.index
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .find(|u| u.mattermost_user_id == mattermost_user_id)
            .cloned()
            .ok_or_else(|| CalendarSyncError::NotFound(mattermost_user_id.to_string()))
    }

    async fn store_user_active_events(
        &self,
        mattermost_user_id: &str,
        events: &[EventFingerprint],
    ) -> DomainResult<()> {
        self.record("store_user_active_events");
        if let Some(user) = self.users.lock().unwrap().get_mut(mattermost_user_id) {
            user.active_events = events.to_vec();
        }
        Ok(())
    }

    async fn store_user_custom_status_updates(
        &self,
        mattermost_user_id: &str,
        is_custom_status_set: bool,
    ) -> DomainResult<()> {
        self.record("store_user_custom_status_updates");
        if let Some(user) = self.users.lock().unwrap().get_mut(mattermost_user_id) {
            user.is_custom_status_set = is_custom_status_set;
        }
        Ok(())
    }
}

/// In-memory mock for `RemoteCalendar`.
///
/// Users without configured events get an empty view.
#[derive(Default)]
pub struct MockRemoteCalendar {
    events: Mutex<HashMap<String, Vec<Event>>>,
    errors: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<CalendarViewRequest>>,
    fail_batch: Mutex<bool>,
}

impl MockRemoteCalendar {
    pub fn set_events(&self, remote_user_id: &str, events: Vec<Event>) {
        self.events.lock().unwrap().insert(remote_user_id.to_string(), events);
    }

    pub fn fail_user(&self, remote_user_id: &str, message: &str) {
        self.errors.lock().unwrap().insert(remote_user_id.to_string(), message.to_string());
    }

    pub fn fail_batch(&self) {
        *self.fail_batch.lock().unwrap() = true;
    }

    pub fn requests(&self) -> Vec<CalendarViewRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteCalendar for MockRemoteCalendar {
    async fn batch_view_calendars(
        &self,
        requests: &[CalendarViewRequest],
    ) -> DomainResult<Vec<CalendarView>> {
        if *self.fail_batch.lock().unwrap() {
            return Err(CalendarSyncError::Remote("batch request rejected".to_string()));
        }
        self.requests.lock().unwrap().extend_from_slice(requests);

        let events = self.events.lock().unwrap();
        let errors = self.errors.lock().unwrap();
        Ok(requests
            .iter()
            .map(|r| match errors.get(&r.remote_user_id) {
                Some(message) => CalendarView::failed(&r.remote_user_id, "ErrorAccessDenied", message),
                None => CalendarView::ok(
                    &r.remote_user_id,
                    events.get(&r.remote_user_id).cloned().unwrap_or_default(),
                ),
            })
            .collect())
    }
}

/// In-memory mock for `PresenceSink`.
#[derive(Default)]
pub struct MockPresence {
    statuses: Mutex<HashMap<String, UserStatus>>,
    custom: Mutex<HashMap<String, CustomStatus>>,
    timezones: Mutex<HashMap<String, String>>,
    set_calls: Mutex<Vec<(String, PresenceStatus)>>,
    custom_calls: Mutex<Vec<String>>,
    timezone_lookups: Mutex<usize>,
    failing_status: Mutex<HashSet<String>>,
    failing_custom: Mutex<HashSet<String>>,
}

impl MockPresence {
    pub fn set_current(&self, user_id: &str, status: PresenceStatus, manual: bool) {
        self.statuses.lock().unwrap().insert(
            user_id.to_string(),
            UserStatus { user_id: user_id.to_string(), status, manual },
        );
    }

    pub fn current(&self, user_id: &str) -> PresenceStatus {
        self.statuses.lock().unwrap()[user_id].status
    }

    pub fn set_user_custom_status(&self, user_id: &str, status: CustomStatus) {
        self.custom.lock().unwrap().insert(user_id.to_string(), status);
    }

    pub fn custom_status(&self, user_id: &str) -> Option<CustomStatus> {
        self.custom.lock().unwrap().get(user_id).cloned()
    }

    pub fn set_timezone(&self, user_id: &str, timezone: &str) {
        self.timezones.lock().unwrap().insert(user_id.to_string(), timezone.to_string());
    }

    /// Presence writes made by the reconciler.
    pub fn set_calls(&self) -> Vec<(String, PresenceStatus)> {
        self.set_calls.lock().unwrap().clone()
    }

    /// Custom status writes ("set:<user>" / "clear:<user>").
    pub fn custom_calls(&self) -> Vec<String> {
        self.custom_calls.lock().unwrap().clone()
    }

    pub fn timezone_lookups(&self) -> usize {
        *self.timezone_lookups.lock().unwrap()
    }

    /// Make presence writes for this user fail.
    pub fn fail_set_status(&self, user_id: &str) {
        self.failing_status.lock().unwrap().insert(user_id.to_string());
    }

    /// Make custom status set and clear fail for this user.
    pub fn fail_custom_status(&self, user_id: &str) {
        self.failing_custom.lock().unwrap().insert(user_id.to_string());
    }

    fn custom_write(&self, op: &str, user_id: &str) -> DomainResult<()> {
        if self.failing_custom.lock().unwrap().contains(user_id) {
            return Err(CalendarSyncError::Presence(format!("{op} custom status rejected")));
        }
        self.custom_calls.lock().unwrap().push(format!("{op}:{user_id}"));
        Ok(())
    }
}

#[async_trait]
impl PresenceSink for MockPresence {
    async fn get_statuses(&self, mattermost_user_ids: &[String]) -> DomainResult<Vec<UserStatus>> {
        let statuses = self.statuses.lock().unwrap();
        Ok(mattermost_user_ids.iter().filter_map(|id| statuses.get(id).cloned()).collect())
    }

    async fn set_status(&self, mattermost_user_id: &str, status: PresenceStatus) -> DomainResult<()> {
        if self.failing_status.lock().unwrap().contains(mattermost_user_id) {
            return Err(CalendarSyncError::Presence("status update rejected".to_string()));
        }
        self.set_calls.lock().unwrap().push((mattermost_user_id.to_string(), status));
        self.set_current(mattermost_user_id, status, false);
        Ok(())
    }

    async fn get_custom_status(&self, mattermost_user_id: &str) -> DomainResult<Option<CustomStatus>> {
        Ok(self.custom_status(mattermost_user_id))
    }

    async fn set_custom_status(
        &self,
        mattermost_user_id: &str,
        status: &CustomStatus,
    ) -> DomainResult<()> {
        self.custom_write("set", mattermost_user_id)?;
        self.set_user_custom_status(mattermost_user_id, status.clone());
        Ok(())
    }

    async fn clear_custom_status(&self, mattermost_user_id: &str) -> DomainResult<()> {
        self.custom_write("clear", mattermost_user_id)?;
        self.custom.lock().unwrap().remove(mattermost_user_id);
        Ok(())
    }

    async fn get_timezone(&self, mattermost_user_id: &str) -> DomainResult<String> {
        *self.timezone_lookups.lock().unwrap() += 1;
        self.timezones
            .lock()
            .unwrap()
            .get(mattermost_user_id)
            .cloned()
            .ok_or_else(|| CalendarSyncError::Presence("timezone unavailable".to_string()))
    }
}

/// In-memory mock for `Notifier`.
#[derive(Default)]
pub struct MockNotifier {
    messages: Mutex<Vec<(String, String)>>,
    attachments: Mutex<Vec<(String, Attachment)>>,
    failing_text: Mutex<Vec<String>>,
}

impl MockNotifier {
    /// Make direct messages containing `text` fail.
    pub fn fail_dm_containing(&self, text: &str) {
        self.failing_text.lock().unwrap().push(text.to_string());
    }

    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn attachments(&self) -> Vec<(String, Attachment)> {
        self.attachments.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_direct_message(&self, mattermost_user_id: &str, message: &str) -> DomainResult<()> {
        if self.failing_text.lock().unwrap().iter().any(|t| message.contains(t.as_str())) {
            return Err(CalendarSyncError::Notify("direct message rejected".to_string()));
        }
        self.messages.lock().unwrap().push((mattermost_user_id.to_string(), message.to_string()));
        Ok(())
    }

    async fn send_direct_message_with_attachment(
        &self,
        mattermost_user_id: &str,
        attachment: &Attachment,
    ) -> DomainResult<()> {
        self.attachments
            .lock()
            .unwrap()
            .push((mattermost_user_id.to_string(), attachment.clone()));
        Ok(())
    }
}

/// In-memory mock for `ConfirmationStore`.
#[derive(Default)]
pub struct MockConfirmationStore {
    pending: Mutex<HashMap<String, PendingConfirmation>>,
}

impl MockConfirmationStore {
    pub fn pending(&self, mattermost_user_id: &str) -> Option<PendingConfirmation> {
        self.pending.lock().unwrap().get(mattermost_user_id).cloned()
    }
}

#[async_trait]
impl ConfirmationStore for MockConfirmationStore {
    async fn store_pending(&self, confirmation: &PendingConfirmation) -> DomainResult<()> {
        self.pending
            .lock()
            .unwrap()
            .insert(confirmation.mattermost_user_id.clone(), confirmation.clone());
        Ok(())
    }

    async fn take_pending(
        &self,
        mattermost_user_id: &str,
    ) -> DomainResult<Option<PendingConfirmation>> {
        Ok(self.pending.lock().unwrap().remove(mattermost_user_id))
    }
}
