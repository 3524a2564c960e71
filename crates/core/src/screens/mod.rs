//! Screen lifecycle glue.
//!
//! Screens translate navigation events (focus, hardware back, header back,
//! "about to leave") into editor calls. Saves triggered on exit are spawned on
//! the tokio runtime and never awaited by the UI; ids assigned by completed saves
//! come back over a channel and are applied on the next event.
//!
//! Spawning methods must be called from within a tokio runtime.

pub mod diary;
pub mod vicious_circle;

pub use diary::DiaryScreen;
pub use vicious_circle::ViciousCircleScreen;

use crate::error::KogitoResult;
use tokio::task::JoinHandle;

/// Result of a hardware back press.
#[derive(Debug)]
pub struct BackPress {
    /// `true` when the screen consumed the press and navigation must not
    /// proceed on its own.
    pub handled: bool,
    /// The spawned save, if there was anything to save.
    pub save: Option<JoinHandle<()>>,
}

/// Fetch failures degrade to "no entry", which the editors treat as a new
/// empty document.
fn entry_or_none<T>(kind: &str, result: KogitoResult<Option<T>>) -> Option<T> {
    match result {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("failed to load {kind}, starting empty: {:?}", e);
            None
        }
    }
}
