//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the
//! screens. Nothing in the event-handling path reads environment variables.

use crate::constants::DEFAULT_TRACKING_PROJECT;
use crate::error::{KogitoError, KogitoResult};
use kogito_types::NonEmptyText;
use std::str::FromStr;

/// Mobile platform the screens run on.
///
/// Platform matters for exit handling: on iOS there is no hardware back
/// button, so the diary also saves from the navigation "before remove" event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Platform {
    Ios,
    #[default]
    Android,
}

impl FromStr for Platform {
    type Err = KogitoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(KogitoError::InvalidInput(format!(
                "unknown platform '{other}' (expected ios or android)"
            ))),
        }
    }
}

impl Platform {
    /// Parse an optional environment value. Missing or blank means the default.
    pub fn from_env_value(value: Option<String>) -> KogitoResult<Self> {
        non_blank(value)
            .map(|v| v.parse::<Platform>())
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    platform: Platform,
    tracking_project: NonEmptyText,
    serialise_saves: bool,
}

impl CoreConfig {
    pub fn new(platform: Platform, tracking_project: NonEmptyText, serialise_saves: bool) -> Self {
        Self {
            platform,
            tracking_project,
            serialise_saves,
        }
    }

    /// Builds the configuration from raw environment values.
    ///
    /// # Errors
    ///
    /// Returns `KogitoError::InvalidInput` for an unknown platform or a
    /// malformed boolean.
    pub fn from_env_values(
        platform: Option<String>,
        tracking_project: Option<String>,
        serialise_saves: Option<String>,
    ) -> KogitoResult<Self> {
        let platform = Platform::from_env_value(platform)?;
        let tracking_project = match non_blank(tracking_project) {
            Some(project) => NonEmptyText::new(project)?,
            None => NonEmptyText::new(DEFAULT_TRACKING_PROJECT)?,
        };
        let serialise_saves = bool_from_env_value(serialise_saves)?.unwrap_or(true);

        Ok(Self::new(platform, tracking_project, serialise_saves))
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn tracking_project(&self) -> &NonEmptyText {
        &self.tracking_project
    }

    pub fn serialise_saves(&self) -> bool {
        self.serialise_saves
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn bool_from_env_value(value: Option<String>) -> KogitoResult<Option<bool>> {
    let Some(value) = non_blank(value) else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(KogitoError::InvalidInput(format!(
            "expected a boolean, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = CoreConfig::from_env_values(None, None, None).unwrap();
        assert_eq!(cfg.platform(), Platform::Android);
        assert_eq!(cfg.tracking_project().as_str(), "kogito");
        assert!(cfg.serialise_saves());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg =
            CoreConfig::from_env_values(Some(" ".into()), Some("".into()), Some("\t".into()))
                .unwrap();
        assert_eq!(cfg.platform(), Platform::Android);
        assert_eq!(cfg.tracking_project().as_str(), "kogito");
    }

    #[test]
    fn parses_explicit_values() {
        let cfg = CoreConfig::from_env_values(
            Some("iOS".into()),
            Some("kogito-staging".into()),
            Some("off".into()),
        )
        .unwrap();
        assert_eq!(cfg.platform(), Platform::Ios);
        assert_eq!(cfg.tracking_project().as_str(), "kogito-staging");
        assert!(!cfg.serialise_saves());
    }

    #[test]
    fn rejects_unknown_platform() {
        let err = Platform::from_env_value(Some("web".into())).expect_err("web is unsupported");
        assert!(matches!(err, KogitoError::InvalidInput(_)));
    }

    #[test]
    fn rejects_malformed_boolean() {
        let err = CoreConfig::from_env_values(None, None, Some("maybe".into()))
            .expect_err("maybe is not a boolean");
        assert!(matches!(err, KogitoError::InvalidInput(_)));
    }
}
