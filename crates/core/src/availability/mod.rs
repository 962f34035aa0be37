//! Availability sync: reminders, presence and custom status from the calendar

mod custom_status;
pub mod ports;
mod reminders;
pub mod service;
pub mod state;
mod status;
pub mod views;

pub use ports::{ConfirmationStore, Notifier, PresenceSink, RemoteCalendar, UserStore};
pub use service::{AvailabilityService, StatusUpdate};
pub use state::CalendarState;
