//! In-memory implementations of the collaborator traits.
//!
//! Used by the CLI and by tests. Entries live in process memory only and new
//! entries are given a random UUID as their id.

use crate::diary::{DiaryEntry, SaveDiaryEntryInput};
use crate::error::{KogitoError, KogitoResult};
use crate::ports::{DiarySink, DiarySource, EventBus, ViciousCircleSink, ViciousCircleSource};
use crate::vicious_circle::{SaveViciousCircleInput, ViciousCircleEntry};
use async_trait::async_trait;
use chrono::Utc;
use kogito_types::EntryId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Store {
    vicious_circles: HashMap<EntryId, ViciousCircleEntry>,
    diary: HashMap<EntryId, DiaryEntry>,
    last_vicious_circle_input: Option<SaveViciousCircleInput>,
}

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    store: Mutex<Store>,
    reject_saves: AtomicBool,
    vicious_circle_saves: AtomicUsize,
    diary_saves: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save fail with [`KogitoError::SinkRejected`].
    pub fn reject_saves(&self, reject: bool) {
        self.reject_saves.store(reject, Ordering::SeqCst);
    }

    pub fn insert_vicious_circle(&self, entry: ViciousCircleEntry) -> KogitoResult<()> {
        self.lock()?.vicious_circles.insert(entry.id.clone(), entry);
        Ok(())
    }

    pub fn insert_diary_entry(&self, entry: DiaryEntry) -> KogitoResult<()> {
        self.lock()?.diary.insert(entry.id.clone(), entry);
        Ok(())
    }

    pub fn vicious_circle(&self, id: &EntryId) -> Option<ViciousCircleEntry> {
        self.lock().ok()?.vicious_circles.get(id).cloned()
    }

    pub fn diary_entry(&self, id: &EntryId) -> Option<DiaryEntry> {
        self.lock().ok()?.diary.get(id).cloned()
    }

    pub fn vicious_circle_count(&self) -> usize {
        self.lock().map(|s| s.vicious_circles.len()).unwrap_or(0)
    }

    pub fn diary_count(&self) -> usize {
        self.lock().map(|s| s.diary.len()).unwrap_or(0)
    }

    /// Number of accepted vicious-circle saves.
    pub fn vicious_circle_saves(&self) -> usize {
        self.vicious_circle_saves.load(Ordering::SeqCst)
    }

    /// Number of accepted diary saves.
    pub fn diary_saves(&self) -> usize {
        self.diary_saves.load(Ordering::SeqCst)
    }

    pub fn last_vicious_circle_input(&self) -> Option<SaveViciousCircleInput> {
        self.lock().ok()?.last_vicious_circle_input.clone()
    }

    fn lock(&self) -> KogitoResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| KogitoError::SourceUnavailable("store lock poisoned".into()))
    }

    fn check_accepting(&self) -> KogitoResult<()> {
        if self.reject_saves.load(Ordering::SeqCst) {
            return Err(KogitoError::SinkRejected("backend is rejecting saves".into()));
        }
        Ok(())
    }
}

fn new_entry_id() -> KogitoResult<EntryId> {
    Ok(EntryId::new(uuid::Uuid::new_v4().simple().to_string())?)
}

#[async_trait]
impl ViciousCircleSource for InMemoryBackend {
    async fn fetch(&self, id: &EntryId) -> KogitoResult<Option<ViciousCircleEntry>> {
        Ok(self.lock()?.vicious_circles.get(id).cloned())
    }
}

#[async_trait]
impl ViciousCircleSink for InMemoryBackend {
    async fn save(&self, input: SaveViciousCircleInput) -> KogitoResult<EntryId> {
        self.check_accepting()?;
        let mut store = self.lock()?;

        let id = match &input.id {
            Some(id) => id.clone(),
            None => new_entry_id()?,
        };
        let date = store
            .vicious_circles
            .get(&id)
            .map(|existing| existing.date)
            .unwrap_or_else(Utc::now);

        store.vicious_circles.insert(
            id.clone(),
            ViciousCircleEntry {
                id: id.clone(),
                date,
                sections: input.sections.clone(),
            },
        );
        store.last_vicious_circle_input = Some(input);
        self.vicious_circle_saves.fetch_add(1, Ordering::SeqCst);

        Ok(id)
    }
}

#[async_trait]
impl DiarySource for InMemoryBackend {
    async fn fetch(&self, id: &EntryId) -> KogitoResult<Option<DiaryEntry>> {
        Ok(self.lock()?.diary.get(id).cloned())
    }
}

#[async_trait]
impl DiarySink for InMemoryBackend {
    async fn save(&self, input: SaveDiaryEntryInput) -> KogitoResult<Option<EntryId>> {
        self.check_accepting()?;
        let mut store = self.lock()?;

        let id = match input.id {
            Some(id) => id,
            None => new_entry_id()?,
        };
        let date = store
            .diary
            .get(&id)
            .map(|existing| existing.date)
            .unwrap_or_else(Utc::now);

        store.diary.insert(
            id.clone(),
            DiaryEntry {
                id: id.clone(),
                date,
                content: input.content,
            },
        );
        self.diary_saves.fetch_add(1, Ordering::SeqCst);

        Ok(Some(id))
    }
}

/// Collects fired app events.
#[derive(Debug, Default)]
pub struct RecordingEventBus {
    events: Mutex<Vec<String>>,
}

impl RecordingEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl EventBus for RecordingEventBus {
    fn fire(&self, event: &str) {
        tracing::debug!(event, "app event fired");
        if let Ok(mut events) = self.events.lock() {
            events.push(event.to_string());
        }
    }
}
