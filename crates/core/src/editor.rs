//! Editor controller for a vicious-circle document.
//!
//! The controller owns the [`Document`] plus two independent pieces of transient
//! UI state:
//!
//! - an [`EditTarget`] while the item editor is open (adding or editing one item)
//! - an [`OverviewTarget`] while a section's full list is shown
//!
//! Both may be active at once: opening an item from the overview list leaves
//! the overview open underneath the editor.
//!
//! ```text
//! idle --open_add/open_edit--> editing --commit_item/remove_item/close_editor--> idle
//! idle --open_overview-------> overviewing --close_overview/remove_item-------> idle
//! ```
//!
//! Operations that do not apply in the current state (committing with no
//! editor open, removing while adding, opening the overview of an empty section)
//! are silent no-ops. Nothing here returns an error.

use crate::persistence::Persistor;
use crate::sections::Section;
use crate::vicious_circle::{Document, SaveViciousCircleInput, ViciousCircleEntry};
use kogito_types::EntryId;

/// What the item editor is working on.
///
/// `index` is `None` when adding a new item and `Some(i)` when editing the
/// existing item at position `i`. `Some(0)` is an edit like any other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditTarget {
    pub section: Section,
    pub index: Option<usize>,
    pub init_text: Option<String>,
}

impl EditTarget {
    /// Text to prefill the editor with.
    pub fn init_text(&self) -> &str {
        self.init_text.as_deref().unwrap_or("")
    }

    pub fn is_new_item(&self) -> bool {
        self.index.is_none()
    }
}

/// Which section's full list is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverviewTarget {
    pub section: Section,
}

#[derive(Clone, Debug, Default)]
pub struct EditorController {
    document: Document,
    editor: Option<EditTarget>,
    overview: Option<OverviewTarget>,
}

impl EditorController {
    /// Mounts the controller on an existing entry, or on an empty document when
    /// there is none.
    pub fn mount(source: Option<&ViciousCircleEntry>) -> Self {
        Self {
            document: Document::from_source(source),
            editor: None,
            overview: None,
        }
    }

    /// Reloads the document when the backing entry changes. Transient state is
    /// left alone.
    pub fn load(&mut self, source: Option<&ViciousCircleEntry>) {
        self.document.load(source);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn edit_target(&self) -> Option<&EditTarget> {
        self.editor.as_ref()
    }

    pub fn overview_target(&self) -> Option<OverviewTarget> {
        self.overview
    }

    pub fn section_size(&self, section: Section) -> usize {
        self.document.section_size(section)
    }

    pub fn item(&self, section: Section, index: usize) -> Option<&str> {
        self.document.section(section).get(index).map(String::as_str)
    }

    pub fn open_add(&mut self, section: Section) {
        tracing::debug!(%section, "open item editor for new item");
        self.editor = Some(EditTarget {
            section,
            index: None,
            init_text: None,
        });
    }

    /// Opens the editor on an existing item. The caller only fires this from a
    /// rendered item, so `index` is expected to be in range.
    pub fn open_edit(&mut self, section: Section, index: usize, current_text: impl Into<String>) {
        tracing::debug!(%section, index, "open item editor for existing item");
        self.editor = Some(EditTarget {
            section,
            index: Some(index),
            init_text: Some(current_text.into()),
        });
    }

    /// Shows the full list of `section`. Empty sections never open.
    pub fn open_overview(&mut self, section: Section) {
        if self.document.section_size(section) > 0 {
            self.overview = Some(OverviewTarget { section });
        }
    }

    /// Writes the editor's text back into the document and closes the editor.
    pub fn commit_item(&mut self, new_text: impl Into<String>) {
        let Some(target) = self.editor.take() else {
            return;
        };
        let new_text = new_text.into();
        let items = self.document.section_mut(target.section);

        match target.index {
            Some(index) => match items.get_mut(index) {
                Some(item) => *item = new_text,
                None => tracing::warn!(
                    section = %target.section,
                    index,
                    len = items.len(),
                    "edited item no longer exists; edit dropped"
                ),
            },
            None => items.push(new_text),
        }
    }

    /// Removes the item under the editor and closes both the editor and the
    /// overview. Does nothing unless an existing item is being edited.
    pub fn remove_item(&mut self) {
        let Some((section, index)) = self
            .editor
            .as_ref()
            .and_then(|target| target.index.map(|index| (target.section, index)))
        else {
            return;
        };

        let items = self.document.section_mut(section);
        if index < items.len() {
            items.remove(index);
        } else {
            tracing::warn!(%section, index, len = items.len(), "removed item no longer exists");
        }

        self.editor = None;
        self.overview = None;
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    pub fn close_overview(&mut self) {
        self.overview = None;
    }

    /// Snapshot to send to the backend, or `None` when there is nothing worth
    /// saving (a never-saved document with every section empty).
    pub fn save_request(&self) -> Option<SaveViciousCircleInput> {
        if self.document.id().is_none() && self.document.sections().is_empty() {
            return None;
        }
        Some(self.document.to_save_input())
    }

    /// Adopts the id assigned by a completed save.
    pub fn record_saved_id(&mut self, id: EntryId) {
        if self.document.id() != Some(&id) {
            tracing::debug!(entry_id = %id, "document assigned id");
            self.document.set_id(id);
        }
    }

    /// Saves the current document and waits for the result.
    ///
    /// Best effort: failures are logged by the persistor and otherwise ignored.
    pub async fn persist(&mut self, persistor: &Persistor) {
        let Some(input) = self.save_request() else {
            return;
        };
        if let Some(id) = persistor.save(input).await {
            self.record_saved_id(id);
        }
    }
}
