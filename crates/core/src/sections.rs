//! The five fixed sections of a vicious circle.
//!
//! A vicious circle is a cognitive-behavioural exercise: a trigger sets off
//! negative automatic thoughts, which feed emotions, physical symptoms and
//! finally behaviour that loops back to the trigger. Each section holds an
//! ordered list of free-text items written by the user.
//!
//! The set of sections is closed, so it is modelled as an enum plus a record with
//! one named field per section rather than a keyed map. Every section is always
//! present (possibly empty) and no other section can exist.

use crate::error::KogitoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five vicious-circle sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Trigger,
    NegativeThoughts,
    Emotions,
    PhysicalSymptoms,
    Behaviour,
}

impl Section {
    /// All sections in the order they are laid out around the circle.
    pub const ALL: [Section; 5] = [
        Section::Trigger,
        Section::NegativeThoughts,
        Section::Emotions,
        Section::PhysicalSymptoms,
        Section::Behaviour,
    ];

    /// Wire key used by the backend schema.
    pub fn key(self) -> &'static str {
        match self {
            Section::Trigger => "trigger",
            Section::NegativeThoughts => "negativeThoughts",
            Section::Emotions => "emotions",
            Section::PhysicalSymptoms => "physicalSymptoms",
            Section::Behaviour => "behaviour",
        }
    }

    /// Caption shown inside the circle.
    pub fn title(self) -> &'static str {
        match self {
            Section::Trigger => "SPOUŠTĚČ/MAMUT",
            Section::NegativeThoughts => "AUTOMATICKÉ NEGATIVNÍ MYŠLENKY",
            Section::Emotions => "EMOCE",
            Section::PhysicalSymptoms => "TĚLESNÉ PŘÍZNAKY",
            Section::Behaviour => "CHOVÁNÍ",
        }
    }

    /// Title of the item editor opened for this section.
    pub fn prompt(self) -> &'static str {
        match self {
            Section::Trigger => "Zapsat spouštěč",
            Section::NegativeThoughts => "Zapsat negativní myšlenky",
            Section::Emotions => "Zapsat emoce",
            Section::PhysicalSymptoms => "Zapsat tělesné příznaky",
            Section::Behaviour => "Zapsat chování",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = KogitoError;

    /// Accepts the wire key (`negativeThoughts`) or its snake_case form
    /// (`negative_thoughts`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s.trim().chars().filter(|c| *c != '_').collect();
        Section::ALL
            .into_iter()
            .find(|section| section.key().eq_ignore_ascii_case(&normalised))
            .ok_or_else(|| KogitoError::InvalidSection(s.to_string()))
    }
}

/// The contents of all five sections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sections {
    pub trigger: Vec<String>,
    pub negative_thoughts: Vec<String>,
    pub emotions: Vec<String>,
    pub physical_symptoms: Vec<String>,
    pub behaviour: Vec<String>,
}

impl Sections {
    pub fn get(&self, section: Section) -> &Vec<String> {
        match section {
            Section::Trigger => &self.trigger,
            Section::NegativeThoughts => &self.negative_thoughts,
            Section::Emotions => &self.emotions,
            Section::PhysicalSymptoms => &self.physical_symptoms,
            Section::Behaviour => &self.behaviour,
        }
    }

    pub fn get_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Trigger => &mut self.trigger,
            Section::NegativeThoughts => &mut self.negative_thoughts,
            Section::Emotions => &mut self.emotions,
            Section::PhysicalSymptoms => &mut self.physical_symptoms,
            Section::Behaviour => &mut self.behaviour,
        }
    }

    pub fn len(&self, section: Section) -> usize {
        self.get(section).len()
    }

    /// True when every section is empty.
    pub fn is_empty(&self) -> bool {
        Section::ALL.iter().all(|s| self.get(*s).is_empty())
    }
}
