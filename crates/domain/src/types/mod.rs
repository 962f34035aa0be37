//! Domain types and models

pub mod event;
pub mod message;
pub mod status;
pub mod summary;
pub mod user;

pub use event::{
    Attendee, CalendarView, CalendarViewRequest, EmailAddress, Event, EventFingerprint,
    RemoteError, ShowAs,
};
pub use message::{Attachment, PostAction};
pub use status::{CustomStatus, PresenceStatus, UserStatus};
pub use summary::{PendingConfirmation, StatusTransition, SyncJobSummary};
pub use user::{RemoteUser, Settings, StatusOption, User, UserIndex, UserShort};
