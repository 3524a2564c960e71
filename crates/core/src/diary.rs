//! Diary (journal) entry editing.
//!
//! A diary entry is a single block of free text. The editor saves on screen exit
//! like the vicious-circle editor does, with two differences: an empty entry is
//! never sent, and the first successful save of a new entry is tracked as an
//! addition and announced so diary lists refresh.

use crate::constants::REFETCH_USER_DIARY;
use crate::ports::{DiarySink, EventBus, Tracker};
use crate::tracking::TrackingEvent;
use crate::vicious_circle::format_heading_date;
use chrono::{DateTime, Utc};
use kogito_types::EntryId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: EntryId,
    pub date: DateTime<Utc>,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDiaryEntryInput {
    pub id: Option<EntryId>,
    pub content: String,
}

/// Result of a diary save attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The backend accepted the save and answered with this id (possibly none).
    Saved(Option<EntryId>),
    /// The save failed and was discarded.
    Failed,
}

#[derive(Clone, Debug, Default)]
pub struct DiaryEditor {
    id: Option<EntryId>,
    content: String,
    date: Option<DateTime<Utc>>,
}

impl DiaryEditor {
    /// Points the editor at `id` (or at a new entry) with blank content.
    pub fn open(id: Option<EntryId>, tracker: &dyn Tracker) -> Self {
        tracker.track(TrackingEvent::JournalEntryOpened);
        Self {
            id,
            content: String::new(),
            date: None,
        }
    }

    /// Takes the content of a fetched entry, or clears it when there is none.
    pub fn load(&mut self, source: Option<&DiaryEntry>) {
        match source {
            Some(entry) => {
                self.content = entry.content.clone();
                self.date = Some(entry.date);
            }
            None => {
                self.content.clear();
                self.date = None;
            }
        }
    }

    pub fn id(&self) -> Option<&EntryId> {
        self.id.as_ref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
    }

    pub fn heading_date(&self) -> Option<String> {
        self.date.map(format_heading_date)
    }

    /// `None` while the content is empty.
    pub fn save_request(&self) -> Option<SaveDiaryEntryInput> {
        if self.content.is_empty() {
            return None;
        }
        Some(SaveDiaryEntryInput {
            id: self.id.clone(),
            content: self.content.clone(),
        })
    }

    /// Applies the outcome of a save. A successful save replaces the id with
    /// whatever the backend answered; a failed one changes nothing.
    pub fn apply_outcome(&mut self, outcome: SaveOutcome) {
        if let SaveOutcome::Saved(id) = outcome {
            self.id = id;
        }
    }

    pub async fn persist(&mut self, persistor: &DiaryPersistor) {
        let Some(input) = self.save_request() else {
            return;
        };
        let outcome = persistor.save(input).await;
        self.apply_outcome(outcome);
    }
}

/// Best-effort diary saving. See [`crate::persistence`] for the contract,
/// including the gate's one-document scope.
#[derive(Clone)]
pub struct DiaryPersistor {
    sink: Arc<dyn DiarySink>,
    tracker: Arc<dyn Tracker>,
    events: Arc<dyn EventBus>,
    gate: Option<Arc<Mutex<Option<EntryId>>>>,
}

impl DiaryPersistor {
    pub fn new(
        sink: Arc<dyn DiarySink>,
        tracker: Arc<dyn Tracker>,
        events: Arc<dyn EventBus>,
        serialise_saves: bool,
    ) -> Self {
        Self {
            sink,
            tracker,
            events,
            gate: serialise_saves.then(|| Arc::new(Mutex::new(None))),
        }
    }

    pub async fn save(&self, mut input: SaveDiaryEntryInput) -> SaveOutcome {
        let mut assigned = match &self.gate {
            Some(gate) => Some(gate.lock().await),
            None => None,
        };
        if input.id.is_none() {
            if let Some(Some(id)) = assigned.as_deref() {
                input.id = Some(id.clone());
            }
        }

        let is_new = input.id.is_none();
        match self.sink.save(input).await {
            Ok(id) => {
                if let (Some(slot), Some(id)) = (assigned.as_mut(), &id) {
                    **slot = Some(id.clone());
                }
                if is_new {
                    self.tracker.track(TrackingEvent::JournalEntryAdded);
                    self.events.fire(REFETCH_USER_DIARY);
                }
                tracing::info!(entry_id = ?id.as_ref().map(EntryId::as_str), "diary entry saved");
                SaveOutcome::Saved(id)
            }
            Err(e) => {
                tracing::error!("Save diary entry error: {:?}", e);
                SaveOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for DiaryPersistor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiaryPersistor")
            .field("serialise_saves", &self.gate.is_some())
            .finish_non_exhaustive()
    }
}
