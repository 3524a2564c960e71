//! Validated primitive types shared across the Kogito crates.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    #[error("text is blank")]
    Empty,
}

/// Trimmed text with at least one non-whitespace character. Used for ids and
/// configured names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyText {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// Blank strings from the backend are rejected rather than wrapped.
impl<'de> Deserialize<'de> for NonEmptyText {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Server-assigned identifier of a saved entry.
///
/// The backend owns the format, so the value is treated as opaque. The only
/// guarantee is that it is not blank. Entries that have never been saved have no
/// `EntryId` at all (`Option<EntryId>` is `None`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(NonEmptyText);

impl EntryId {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        NonEmptyText::new(input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for EntryId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  loud noise \n").expect("should accept padded text");
        assert_eq!(text.as_str(), "loud noise");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   "), Err(TextError::Empty));
        assert_eq!(NonEmptyText::new(""), Err(TextError::Empty));
    }

    #[test]
    fn entry_id_serialises_as_plain_string() {
        let id: EntryId = "abc123".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");

        let back: EntryId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn entry_id_rejects_blank_json() {
        let result: Result<EntryId, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err(), "blank id should not deserialise");
    }
}
