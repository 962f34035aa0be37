//! Per-user calendar state and busy-event selection
//!
//! A user is either free or busy because of a known set of event
//! occurrences. The store only keeps the fingerprints; this module turns
//! them back into an explicit state and compares them with a fresh view.

use std::collections::BTreeSet;

use calpresence_domain::{Event, EventFingerprint};

/// Whether the calendar currently keeps the user busy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarState {
    Free,
    Busy(BTreeSet<EventFingerprint>),
}

impl CalendarState {
    /// Rebuild the state from the persisted active-event fingerprints.
    pub fn from_active_events(active_events: &[EventFingerprint]) -> Self {
        if active_events.is_empty() {
            Self::Free
        } else {
            Self::Busy(active_events.iter().cloned().collect())
        }
    }

    /// True when no busy event is being tracked
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// Fingerprints to persist for this state.
    pub fn active_events(&self) -> Vec<EventFingerprint> {
        match self {
            Self::Free => Vec::new(),
            Self::Busy(events) => events.iter().cloned().collect(),
        }
    }
}

/// Busy-displayed events of a view, earliest start first.
pub fn busy_events(events: &[Event]) -> Vec<&Event> {
    let mut busy: Vec<&Event> = events.iter().filter(|e| e.is_busy()).collect();
    busy.sort_by_key(|e| e.start);
    busy
}

/// Whether any event starts before the previous one ends.
///
/// `events` must be sorted by start time.
pub fn has_overlapping_events(events: &[&Event]) -> bool {
    events.windows(2).any(|pair| pair[0].end > pair[1].start)
}

/// Fingerprints of the events that keep the user busy. Cancelled
/// occurrences are skipped.
pub fn active_fingerprints(events: &[&Event]) -> BTreeSet<EventFingerprint> {
    events.iter().filter(|e| !e.is_cancelled).map(|e| e.fingerprint()).collect()
}
