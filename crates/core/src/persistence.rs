//! Best-effort saving of vicious-circle entries.
//!
//! Saving is fire-and-forget from the user's point of view: a failed save is
//! logged and dropped, never retried and never surfaced. Callers get `None` back
//! and carry on. This is the one place where sink errors are deliberately caught
//! and discarded.
//!
//! Saves can optionally pass through a gate so that two exit events fired in
//! quick succession (hardware back plus the navigation listener) run one after
//! the other instead of racing. Both still run; nothing is deduplicated or
//! cancelled. The gate also holds the id assigned by the last successful save,
//! and a later snapshot taken before that id was known is sent as an update of
//! the same entry. A gated persistor therefore belongs to one document.

use crate::ports::{Tracker, ViciousCircleSink};
use crate::tracking::TrackingEvent;
use crate::vicious_circle::SaveViciousCircleInput;
use kogito_types::EntryId;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct Persistor {
    sink: Arc<dyn ViciousCircleSink>,
    tracker: Arc<dyn Tracker>,
    gate: Option<Arc<Mutex<Option<EntryId>>>>,
}

impl Persistor {
    /// Creates a persistor. With `serialise_saves` set, concurrent saves through
    /// this persistor (and its clones) run one at a time.
    pub fn new(
        sink: Arc<dyn ViciousCircleSink>,
        tracker: Arc<dyn Tracker>,
        serialise_saves: bool,
    ) -> Self {
        Self {
            sink,
            tracker,
            gate: serialise_saves.then(|| Arc::new(Mutex::new(None))),
        }
    }

    /// Sends `input` to the sink.
    ///
    /// Returns the id the entry is stored under, or `None` if the sink rejected
    /// the save. Emits [`TrackingEvent::ViciousCircleEdited`] on success only.
    pub async fn save(&self, mut input: SaveViciousCircleInput) -> Option<EntryId> {
        let mut assigned = match &self.gate {
            Some(gate) => Some(gate.lock().await),
            None => None,
        };
        if input.id.is_none() {
            if let Some(Some(id)) = assigned.as_deref() {
                input.id = Some(id.clone());
            }
        }

        match self.sink.save(input).await {
            Ok(id) => {
                if let Some(slot) = assigned.as_mut() {
                    **slot = Some(id.clone());
                }
                tracing::info!(entry_id = %id, "vicious circle saved");
                self.tracker.track(TrackingEvent::ViciousCircleEdited);
                Some(id)
            }
            Err(e) => {
                tracing::error!("Save vicious circle error: {:?}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for Persistor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistor")
            .field("serialise_saves", &self.gate.is_some())
            .finish_non_exhaustive()
    }
}
