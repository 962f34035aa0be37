//! # Calendar Presence Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The availability reconciler (reminders, presence, custom status)
//! - Port/adapter interfaces (traits) for the calendar, store and chat
//!   platform
//! - Rendering of the messages sent to users
//!
//! ## Architecture Principles
//! - Only depends on `calpresence-domain`
//! - No HTTP, storage or platform code
//! - All external dependencies via traits

pub mod availability;
pub mod utils;

pub use availability::ports::{
    ConfirmationStore, Notifier, PresenceSink, RemoteCalendar, UserStore,
};
pub use availability::{AvailabilityService, CalendarState, StatusUpdate};
pub use utils::{Clock, FixedClock, SystemClock};
