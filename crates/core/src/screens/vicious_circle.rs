use super::{entry_or_none, BackPress};
use crate::editor::EditorController;
use crate::persistence::Persistor;
use crate::ports::{Tracker, ViciousCircleSource};
use crate::tracking::TrackingEvent;
use kogito_types::EntryId;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

pub struct ViciousCircleScreen {
    controller: EditorController,
    persistor: Persistor,
    tracker: Arc<dyn Tracker>,
    saved_ids_tx: UnboundedSender<EntryId>,
    saved_ids_rx: UnboundedReceiver<EntryId>,
}

impl ViciousCircleScreen {
    /// Mounts the screen for entry `id`, or for a new entry when `id` is `None`.
    pub async fn mount(
        source: &dyn ViciousCircleSource,
        id: Option<&EntryId>,
        persistor: Persistor,
        tracker: Arc<dyn Tracker>,
    ) -> Self {
        let entry = match id {
            Some(id) => entry_or_none("vicious circle", source.fetch(id).await),
            None => None,
        };
        let (saved_ids_tx, saved_ids_rx) = mpsc::unbounded_channel();

        Self {
            controller: EditorController::mount(entry.as_ref()),
            persistor,
            tracker,
            saved_ids_tx,
            saved_ids_rx,
        }
    }

    pub fn controller(&self) -> &EditorController {
        &self.controller
    }

    /// Controller access for user input. Pending saved ids are applied first.
    pub fn controller_mut(&mut self) -> &mut EditorController {
        self.sync_saved_ids();
        &mut self.controller
    }

    /// Applies ids assigned by background saves that have finished.
    pub fn sync_saved_ids(&mut self) {
        while let Ok(id) = self.saved_ids_rx.try_recv() {
            self.controller.record_saved_id(id);
        }
    }

    pub fn on_focus(&mut self) {
        self.tracker.track(TrackingEvent::ViciousCircleOpened);
    }

    /// Saves in the background and lets navigation go back.
    pub fn on_hardware_back(&mut self) -> BackPress {
        BackPress {
            handled: false,
            save: self.spawn_persist(),
        }
    }

    pub fn on_header_back(&mut self) -> Option<JoinHandle<()>> {
        self.spawn_persist()
    }

    /// Starts a save of the current document without waiting for it.
    pub fn spawn_persist(&mut self) -> Option<JoinHandle<()>> {
        self.sync_saved_ids();
        let input = self.controller.save_request()?;
        let persistor = self.persistor.clone();
        let saved_ids = self.saved_ids_tx.clone();

        Some(tokio::spawn(async move {
            if let Some(id) = persistor.save(input).await {
                // The screen may be gone by now; nothing to update then.
                let _ = saved_ids.send(id);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{KogitoError, KogitoResult};
    use crate::memory::InMemoryBackend;
    use crate::sections::{Section, Sections};
    use crate::tracking::RecordingTracker;
    use crate::vicious_circle::ViciousCircleEntry;
    use async_trait::async_trait;
    use chrono::Utc;

    struct BrokenSource;

    #[async_trait]
    impl ViciousCircleSource for BrokenSource {
        async fn fetch(&self, _id: &EntryId) -> KogitoResult<Option<ViciousCircleEntry>> {
            Err(KogitoError::SourceUnavailable("offline".into()))
        }
    }

    fn setup() -> (Arc<InMemoryBackend>, Arc<RecordingTracker>, Persistor) {
        let backend = Arc::new(InMemoryBackend::new());
        let tracker = Arc::new(RecordingTracker::new());
        let persistor = Persistor::new(backend.clone(), tracker.clone(), true);
        (backend, tracker, persistor)
    }

    #[tokio::test]
    async fn mount_loads_existing_entry() {
        let (backend, tracker, persistor) = setup();
        let id = EntryId::new("vc-1").unwrap();
        backend
            .insert_vicious_circle(ViciousCircleEntry {
                id: id.clone(),
                date: Utc::now(),
                sections: Sections {
                    trigger: vec!["loud noise".into()],
                    ..Sections::default()
                },
            })
            .unwrap();

        let screen =
            ViciousCircleScreen::mount(backend.as_ref(), Some(&id), persistor, tracker).await;

        assert_eq!(screen.controller().item(Section::Trigger, 0), Some("loud noise"));
        assert_eq!(screen.controller().document().id(), Some(&id));
    }

    #[tokio::test]
    async fn mount_with_unknown_id_starts_empty() {
        let (backend, tracker, persistor) = setup();
        let id = EntryId::new("nope").unwrap();

        let screen =
            ViciousCircleScreen::mount(backend.as_ref(), Some(&id), persistor, tracker).await;

        assert!(screen.controller().document().sections().is_empty());
        assert!(screen.controller().document().id().is_none());
    }

    #[tokio::test]
    async fn mount_degrades_source_failure_to_empty_document() {
        let (_backend, tracker, persistor) = setup();
        let id = EntryId::new("vc-1").unwrap();

        let screen = ViciousCircleScreen::mount(&BrokenSource, Some(&id), persistor, tracker).await;

        assert!(screen.controller().document().sections().is_empty());
    }

    #[tokio::test]
    async fn focus_tracks_opened() {
        let (backend, tracker, persistor) = setup();
        let mut screen =
            ViciousCircleScreen::mount(backend.as_ref(), None, persistor, tracker.clone()).await;

        screen.on_focus();

        assert_eq!(tracker.events(), vec![TrackingEvent::ViciousCircleOpened]);
    }

    #[tokio::test]
    async fn hardware_back_saves_and_lets_navigation_proceed() {
        let (backend, tracker, persistor) = setup();
        let mut screen =
            ViciousCircleScreen::mount(backend.as_ref(), None, persistor, tracker.clone()).await;
        screen.controller_mut().open_add(Section::Emotions);
        screen.controller_mut().commit_item("fear");

        let press = screen.on_hardware_back();
        assert!(!press.handled);
        press.save.expect("save should be spawned").await.unwrap();

        screen.sync_saved_ids();
        let id = screen
            .controller()
            .document()
            .id()
            .cloned()
            .expect("id should be applied");
        assert_eq!(
            backend.vicious_circle(&id).unwrap().sections.emotions,
            vec!["fear".to_string()]
        );
        assert_eq!(tracker.count(TrackingEvent::ViciousCircleEdited), 1);
    }

    #[tokio::test]
    async fn back_on_untouched_new_entry_saves_nothing() {
        let (backend, tracker, persistor) = setup();
        let mut screen =
            ViciousCircleScreen::mount(backend.as_ref(), None, persistor, tracker).await;

        let press = screen.on_hardware_back();

        assert!(press.save.is_none());
        assert_eq!(backend.vicious_circle_saves(), 0);
    }

    #[tokio::test]
    async fn double_exit_runs_both_saves() {
        let (backend, tracker, persistor) = setup();
        let id = EntryId::new("vc-1").unwrap();
        backend
            .insert_vicious_circle(ViciousCircleEntry {
                id: id.clone(),
                date: Utc::now(),
                sections: Sections::default(),
            })
            .unwrap();
        let mut screen =
            ViciousCircleScreen::mount(backend.as_ref(), Some(&id), persistor, tracker).await;

        let first = screen.on_hardware_back().save.unwrap();
        let second = screen.on_header_back().unwrap();
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(backend.vicious_circle_saves(), 2);
        assert_eq!(backend.vicious_circle_count(), 1);
    }

    #[tokio::test]
    async fn double_exit_on_new_document_creates_one_entry() {
        let (backend, tracker, persistor) = setup();
        let mut screen =
            ViciousCircleScreen::mount(backend.as_ref(), None, persistor, tracker).await;
        screen.controller_mut().open_add(Section::Trigger);
        screen.controller_mut().commit_item("noise");

        let first = screen.on_hardware_back().save.unwrap();
        let second = screen.on_header_back().unwrap();
        first.await.unwrap();
        second.await.unwrap();
        screen.sync_saved_ids();

        assert_eq!(backend.vicious_circle_saves(), 2);
        assert_eq!(backend.vicious_circle_count(), 1);
        let id = screen.controller().document().id().cloned().unwrap();
        assert_eq!(
            backend.vicious_circle(&id).unwrap().sections.trigger,
            vec!["noise".to_string()]
        );
    }
}
