//! Rendering of reminder messages and status-change prompts

use std::str::FromStr;

use calpresence_domain::constants::{PATH_CONFIRM_STATUS_CHANGE, PATH_POST_ACTION};
use calpresence_domain::{
    Attachment, CalendarSyncError, Event, PostAction, PresenceStatus, Result,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::{Map, Value};

const NO_SUBJECT: &str = "(No subject)";

/// Reminder for an event about to start, with times in the user's timezone.
pub fn render_upcoming_event(event: &Event, timezone: &str) -> Result<String> {
    let tz = Tz::from_str(timezone).map_err(|e| {
        CalendarSyncError::InvalidInput(format!("unknown timezone {timezone}: {e}"))
    })?;

    let mut message = String::from("You have an upcoming event:\n");
    message.push_str(&event_line(event));
    message.push_str(&format!(
        " will start at {} and end at {} ({})",
        local_time(event.start, tz),
        local_time(event.end, tz),
        tz.name()
    ));
    if let Some(location) = event.location.as_deref().filter(|l| !l.trim().is_empty()) {
        message.push_str(&format!("\nLocation: {location}"));
    }
    Ok(message)
}

/// Interactive prompt asking the user to accept a presence change.
pub fn render_status_change_prompt(
    events: &[&Event],
    change_to: PresenceStatus,
    plugin_url_path: &str,
) -> Attachment {
    let text = if events.is_empty() {
        format!(
            "Your meeting has ended. Would you like to change your status to **{change_to}**?"
        )
    } else {
        let lines: Vec<String> = events.iter().map(|e| format!("- {}", event_line(e))).collect();
        format!(
            "You have the following events in progress:\n{}\nWould you like to change your status to **{change_to}**?",
            lines.join("\n")
        )
    };

    let url = confirm_status_change_url(plugin_url_path);
    Attachment {
        title: "Status change".to_string(),
        text,
        actions: vec![
            confirm_action("Yes", &url, true, change_to),
            confirm_action("No", &url, false, change_to),
        ],
    }
}

pub fn confirm_status_change_url(plugin_url_path: &str) -> String {
    format!("{plugin_url_path}{PATH_POST_ACTION}{PATH_CONFIRM_STATUS_CHANGE}")
}

/// Summary fallback when no user produced a message.
pub fn json_block<T: serde::Serialize>(value: &T) -> String {
    let body = serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("\"{e}\""));
    format!("```json\n{body}\n```")
}

fn confirm_action(name: &str, url: &str, accept: bool, change_to: PresenceStatus) -> PostAction {
    let mut context = Map::new();
    context.insert("value".to_string(), Value::Bool(accept));
    context.insert("change_to".to_string(), Value::String(change_to.to_string()));
    PostAction { name: name.to_string(), url: url.to_string(), context }
}

fn event_line(event: &Event) -> String {
    let subject = if event.subject.trim().is_empty() { NO_SUBJECT } else { &event.subject };
    match event.web_link.as_deref() {
        Some(link) if !link.is_empty() => format!("**[{subject}]({link})**"),
        _ => format!("**{subject}**"),
    }
}

fn local_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%-I:%M%p").to_string()
}
