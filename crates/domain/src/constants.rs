//! Domain constants
//!
//! Defaults for the sync cycle and the fixed values the reconciler writes to
//! the chat platform.

// Sync cycle
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 5 * 60;
pub const DEFAULT_CALENDAR_VIEW_WINDOW_MINUTES: i64 = 10;
pub const DEFAULT_UPCOMING_EVENT_NOTIFICATION_MINUTES: i64 = 10;

// Reminder tolerance band, as a fraction of the sync interval (110%)
pub const UPCOMING_EVENT_WINDOW_NUMERATOR: u32 = 11;
pub const UPCOMING_EVENT_WINDOW_DENOMINATOR: u32 = 10;

// Rate-limited logging
pub const DEFAULT_LOG_TRUNCATE_LIMIT: usize = 5;
pub const LOG_TRUNCATE_MSG: &str = "We've truncated the logs due to too many messages";

// Custom status set while in a meeting
pub const MEETING_CUSTOM_STATUS_EMOJI: &str = "calendar";
pub const MEETING_CUSTOM_STATUS_TEXT: &str = "In a meeting";
pub const MEETING_CUSTOM_STATUS_DURATION: &str = "date_and_time";

// Interactive confirmation endpoint, relative to the plugin URL path
pub const PATH_POST_ACTION: &str = "/action";
pub const PATH_CONFIRM_STATUS_CHANGE: &str = "/confirm";
