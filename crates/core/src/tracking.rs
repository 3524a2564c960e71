//! Analytics events and trackers.

use crate::constants::{
    EVENT_JOURNAL_ENTRY_ADDED, EVENT_JOURNAL_ENTRY_OPENED, EVENT_VICIOUS_CYCLE_EDITED,
    EVENT_VICIOUS_CYCLE_OPENED,
};
use crate::ports::Tracker;
use kogito_types::NonEmptyText;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingEvent {
    ViciousCircleOpened,
    ViciousCircleEdited,
    JournalEntryOpened,
    JournalEntryAdded,
}

impl TrackingEvent {
    /// Event name as reported to the analytics service.
    pub fn name(self) -> &'static str {
        match self {
            TrackingEvent::ViciousCircleOpened => EVENT_VICIOUS_CYCLE_OPENED,
            TrackingEvent::ViciousCircleEdited => EVENT_VICIOUS_CYCLE_EDITED,
            TrackingEvent::JournalEntryOpened => EVENT_JOURNAL_ENTRY_OPENED,
            TrackingEvent::JournalEntryAdded => EVENT_JOURNAL_ENTRY_ADDED,
        }
    }
}

/// Emits every event as a structured `tracing` record.
#[derive(Clone, Debug)]
pub struct TracingTracker {
    project: NonEmptyText,
}

impl TracingTracker {
    pub fn new(project: NonEmptyText) -> Self {
        Self { project }
    }
}

impl Tracker for TracingTracker {
    fn track(&self, event: TrackingEvent) {
        tracing::info!(
            target: "kogito::tracking",
            project = %self.project,
            event = event.name(),
            "tracked event"
        );
    }
}

/// Keeps tracked events in memory.
#[derive(Debug, Default)]
pub struct RecordingTracker {
    events: Mutex<Vec<TrackingEvent>>,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackingEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, event: TrackingEvent) -> usize {
        self.events().iter().filter(|e| **e == event).count()
    }
}

impl Tracker for RecordingTracker {
    fn track(&self, event: TrackingEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_analytics_schema() {
        assert_eq!(TrackingEvent::ViciousCircleOpened.name(), "Vicious Cycle Opened");
        assert_eq!(TrackingEvent::JournalEntryAdded.name(), "Journal Entry Added");
    }

    #[test]
    fn recording_tracker_keeps_order() {
        let tracker = RecordingTracker::new();
        tracker.track(TrackingEvent::JournalEntryOpened);
        tracker.track(TrackingEvent::JournalEntryAdded);
        tracker.track(TrackingEvent::JournalEntryOpened);

        assert_eq!(
            tracker.events(),
            vec![
                TrackingEvent::JournalEntryOpened,
                TrackingEvent::JournalEntryAdded,
                TrackingEvent::JournalEntryOpened,
            ]
        );
        assert_eq!(tracker.count(TrackingEvent::JournalEntryOpened), 2);
    }
}
