use super::{entry_or_none, BackPress};
use crate::config::Platform;
use crate::diary::{DiaryEditor, DiaryPersistor, SaveOutcome};
use crate::ports::{DiarySource, Tracker};
use kogito_types::EntryId;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

pub struct DiaryScreen {
    editor: DiaryEditor,
    persistor: DiaryPersistor,
    platform: Platform,
    outcomes_tx: UnboundedSender<SaveOutcome>,
    outcomes_rx: UnboundedReceiver<SaveOutcome>,
}

impl DiaryScreen {
    /// Opens the diary entry `id`, or a blank new entry.
    pub async fn mount(
        source: &dyn DiarySource,
        id: Option<EntryId>,
        persistor: DiaryPersistor,
        tracker: &dyn Tracker,
        platform: Platform,
    ) -> Self {
        let entry = match &id {
            Some(id) => entry_or_none("diary entry", source.fetch(id).await),
            None => None,
        };
        let mut editor = DiaryEditor::open(id, tracker);
        editor.load(entry.as_ref());
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

        Self {
            editor,
            persistor,
            platform,
            outcomes_tx,
            outcomes_rx,
        }
    }

    pub fn editor(&self) -> &DiaryEditor {
        &self.editor
    }

    pub fn set_content(&mut self, text: impl Into<String>) {
        self.sync_outcomes();
        self.editor.set_content(text);
    }

    pub fn sync_outcomes(&mut self) {
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.editor.apply_outcome(outcome);
        }
    }

    /// Saves in the background and consumes the press.
    pub fn on_hardware_back(&mut self) -> BackPress {
        BackPress {
            handled: true,
            save: self.spawn_persist(),
        }
    }

    pub fn on_header_back(&mut self) -> Option<JoinHandle<()>> {
        self.spawn_persist()
    }

    /// Navigation is about to remove the screen. Only iOS saves here; Android
    /// already saved from the hardware back handler.
    pub fn on_before_remove(&mut self) -> Option<JoinHandle<()>> {
        match self.platform {
            Platform::Ios => self.spawn_persist(),
            Platform::Android => None,
        }
    }

    pub fn spawn_persist(&mut self) -> Option<JoinHandle<()>> {
        self.sync_outcomes();
        let input = self.editor.save_request()?;
        let persistor = self.persistor.clone();
        let outcomes = self.outcomes_tx.clone();

        Some(tokio::spawn(async move {
            let outcome = persistor.save(input).await;
            if outcome != SaveOutcome::Failed {
                let _ = outcomes.send(outcome);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REFETCH_USER_DIARY;
    use crate::diary::DiaryEntry;
    use crate::memory::{InMemoryBackend, RecordingEventBus};
    use crate::tracking::{RecordingTracker, TrackingEvent};
    use chrono::Utc;
    use std::sync::Arc;

    struct Fixture {
        backend: Arc<InMemoryBackend>,
        tracker: Arc<RecordingTracker>,
        events: Arc<RecordingEventBus>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                backend: Arc::new(InMemoryBackend::new()),
                tracker: Arc::new(RecordingTracker::new()),
                events: Arc::new(RecordingEventBus::new()),
            }
        }

        async fn mount(&self, id: Option<EntryId>, platform: Platform) -> DiaryScreen {
            let persistor = DiaryPersistor::new(
                self.backend.clone(),
                self.tracker.clone(),
                self.events.clone(),
                true,
            );
            DiaryScreen::mount(
                self.backend.as_ref(),
                id,
                persistor,
                self.tracker.as_ref(),
                platform,
            )
            .await
        }
    }

    #[tokio::test]
    async fn mount_loads_content_and_tracks_open() {
        let f = Fixture::new();
        let id = EntryId::new("d-1").unwrap();
        f.backend
            .insert_diary_entry(DiaryEntry {
                id: id.clone(),
                date: Utc::now(),
                content: "Rainy day.".into(),
            })
            .unwrap();

        let screen = f.mount(Some(id), Platform::Android).await;

        assert_eq!(screen.editor().content(), "Rainy day.");
        assert!(screen.editor().heading_date().is_some());
        assert_eq!(f.tracker.events(), vec![TrackingEvent::JournalEntryOpened]);
    }

    #[tokio::test]
    async fn hardware_back_consumes_press_and_saves() {
        let f = Fixture::new();
        let mut screen = f.mount(None, Platform::Android).await;
        screen.set_content("First entry");

        let press = screen.on_hardware_back();
        assert!(press.handled);
        press.save.unwrap().await.unwrap();
        screen.sync_outcomes();

        let id = screen.editor().id().cloned().expect("id should be applied");
        assert_eq!(f.backend.diary_entry(&id).unwrap().content, "First entry");
        assert_eq!(f.events.events(), vec![REFETCH_USER_DIARY.to_string()]);
    }

    #[tokio::test]
    async fn before_remove_saves_only_on_ios() {
        let f = Fixture::new();

        let mut android = f.mount(None, Platform::Android).await;
        android.set_content("android");
        assert!(android.on_before_remove().is_none());

        let mut ios = f.mount(None, Platform::Ios).await;
        ios.set_content("ios");
        ios.on_before_remove().unwrap().await.unwrap();

        assert_eq!(f.backend.diary_saves(), 1);
    }

    #[tokio::test]
    async fn empty_entry_is_not_saved_on_exit() {
        let f = Fixture::new();
        let mut screen = f.mount(None, Platform::Ios).await;

        assert!(screen.on_header_back().is_none());
        assert!(screen.on_hardware_back().save.is_none());
        assert_eq!(f.backend.diary_saves(), 0);
    }

    #[tokio::test]
    async fn header_back_and_before_remove_on_ios_create_one_entry() {
        let f = Fixture::new();
        let mut screen = f.mount(None, Platform::Ios).await;
        screen.set_content("Busy day");

        let first = screen.on_header_back().unwrap();
        let second = screen.on_before_remove().unwrap();
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(f.backend.diary_saves(), 2);
        assert_eq!(f.backend.diary_count(), 1);
        assert_eq!(f.tracker.count(TrackingEvent::JournalEntryAdded), 1);
        assert_eq!(f.events.events().len(), 1);
    }
}
