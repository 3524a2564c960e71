//! Boundaries to the collaborators the editors depend on.
//!
//! The backend API, the analytics SDK and the app-wide event bus live outside
//! this crate. Each is reached through a trait so screens can be wired to the
//! real services in the app and to [`crate::memory`] in tests and the CLI.

use crate::diary::{DiaryEntry, SaveDiaryEntryInput};
use crate::error::KogitoResult;
use crate::tracking::TrackingEvent;
use crate::vicious_circle::{SaveViciousCircleInput, ViciousCircleEntry};
use async_trait::async_trait;
use kogito_types::EntryId;

/// Looks up vicious-circle entries by id.
#[async_trait]
pub trait ViciousCircleSource: Send + Sync {
    /// Returns `Ok(None)` when the entry does not exist (yet).
    async fn fetch(&self, id: &EntryId) -> KogitoResult<Option<ViciousCircleEntry>>;
}

/// Persists vicious-circle entries.
#[async_trait]
pub trait ViciousCircleSink: Send + Sync {
    /// Saves the entry and returns the id it is stored under.
    async fn save(&self, input: SaveViciousCircleInput) -> KogitoResult<EntryId>;
}

#[async_trait]
pub trait DiarySource: Send + Sync {
    async fn fetch(&self, id: &EntryId) -> KogitoResult<Option<DiaryEntry>>;
}

#[async_trait]
pub trait DiarySink: Send + Sync {
    /// Saves the entry. The response may omit the id.
    async fn save(&self, input: SaveDiaryEntryInput) -> KogitoResult<Option<EntryId>>;
}

/// Fire-and-forget analytics.
pub trait Tracker: Send + Sync {
    fn track(&self, event: TrackingEvent);
}

/// App-wide named events (list refreshes and the like).
pub trait EventBus: Send + Sync {
    fn fire(&self, event: &str);
}
