//! Vicious-circle documents and their backend payloads.
//!
//! [`ViciousCircleEntry`] is what the backend returns for a saved entry,
//! [`SaveViciousCircleInput`] is what gets sent back, and [`Document`] is the
//! editable in-memory copy the editor works on.

use crate::constants::CZECH_MONTHS_GENITIVE;
use crate::sections::{Section, Sections};
use chrono::{DateTime, Datelike, Utc};
use kogito_types::EntryId;
use serde::{Deserialize, Serialize};

/// Formats an entry date for headings, e.g. `5. března 2024, 14:07`.
pub fn format_heading_date(date: DateTime<Utc>) -> String {
    let month = CZECH_MONTHS_GENITIVE[date.month0() as usize];
    format!(
        "{}. {} {}, {}",
        date.day(),
        month,
        date.year(),
        date.format("%H:%M")
    )
}

/// A vicious-circle entry as stored by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViciousCircleEntry {
    pub id: EntryId,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub sections: Sections,
}

/// Save payload accepted by the backend.
///
/// `name` is always empty; the schema still requires the field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveViciousCircleInput {
    pub id: Option<EntryId>,
    pub name: String,
    #[serde(flatten)]
    pub sections: Sections,
}

/// Editable state of one vicious-circle entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    id: Option<EntryId>,
    created_at: DateTime<Utc>,
    loaded_from_source: bool,
    sections: Sections,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty, never-saved document.
    pub fn new() -> Self {
        Self {
            id: None,
            created_at: Utc::now(),
            loaded_from_source: false,
            sections: Sections::default(),
        }
    }

    /// Builds a document from an optional backend entry.
    pub fn from_source(source: Option<&ViciousCircleEntry>) -> Self {
        let mut document = Self::new();
        document.load(source);
        document
    }

    /// Replaces the contents with `source`, or resets every section to empty when
    /// there is no source.
    ///
    /// The source is trusted to be well-formed; nothing is validated.
    pub fn load(&mut self, source: Option<&ViciousCircleEntry>) {
        match source {
            Some(entry) => {
                self.id = Some(entry.id.clone());
                self.created_at = entry.date;
                self.loaded_from_source = true;
                self.sections = entry.sections.clone();
            }
            None => {
                self.id = None;
                self.loaded_from_source = false;
                self.sections = Sections::default();
            }
        }
    }

    pub fn section_size(&self, section: Section) -> usize {
        self.sections.len(section)
    }

    pub fn section(&self, section: Section) -> &[String] {
        self.sections.get(section)
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub(crate) fn section_mut(&mut self, section: Section) -> &mut Vec<String> {
        self.sections.get_mut(section)
    }

    pub fn id(&self) -> Option<&EntryId> {
        self.id.as_ref()
    }

    /// Records the id the backend assigned on save.
    pub fn set_id(&mut self, id: EntryId) {
        self.id = Some(id);
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Heading date for entries that came from the backend.
    ///
    /// Fresh documents have no heading.
    pub fn heading_date(&self) -> Option<String> {
        self.loaded_from_source
            .then(|| format_heading_date(self.created_at))
    }

    pub fn to_save_input(&self) -> SaveViciousCircleInput {
        SaveViciousCircleInput {
            id: self.id.clone(),
            name: String::new(),
            sections: self.sections.clone(),
        }
    }
}
