//! Engine configuration
//!
//! Loaded from YAML with kebab-case keys. Every key is optional:
//!
//! ```yaml
//! no-chord-label: N/C
//! accidentals: unicode   # or ascii
//! default-key: Bb
//! ```

use crate::error::{read_source, ChordError};
use crate::key::Key;
use crate::spelling::AccidentalStyle;
use crate::theory::SpellingPreference;
use serde::Deserialize;
use std::path::Path;

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub no_chord_label: Option<String>,
    pub accidentals: Option<String>,
    pub default_key: Option<String>,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub no_chord_label: String,
    pub accidentals: AccidentalStyle,
    pub default_key: Option<Key>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            no_chord_label: crate::align::NO_CHORD_LABEL.to_string(),
            accidentals: AccidentalStyle::Unicode,
            default_key: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate YAML configuration text.
    ///
    /// ```
    /// use chord_engine::{EngineConfig, AccidentalStyle};
    ///
    /// let config = EngineConfig::from_yaml("accidentals: ascii\ndefault-key: Eb\n").unwrap();
    /// assert_eq!(config.accidentals, AccidentalStyle::Ascii);
    /// assert_eq!(config.no_chord_label, "N/C");
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, ChordError> {
        let raw: RawConfig = if source.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(source).map_err(|e| ChordError::Config(e.to_string()))?
        };
        Self::from_raw(raw)
    }

    /// Load a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ChordError> {
        let config = Self::from_yaml(&read_source(path.as_ref())?)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded engine config");
        Ok(config)
    }

    pub fn from_raw(raw: RawConfig) -> Result<Self, ChordError> {
        let mut config = Self::default();

        if let Some(label) = raw.no_chord_label {
            if label.trim().is_empty() {
                return Err(ChordError::Config(
                    "no-chord-label must not be empty".to_string(),
                ));
            }
            config.no_chord_label = label;
        }

        if let Some(style) = raw.accidentals {
            config.accidentals = AccidentalStyle::from_name(&style).ok_or_else(|| {
                ChordError::Config(format!(
                    "accidentals must be 'unicode' or 'ascii', got '{}'",
                    style
                ))
            })?;
        }

        if let Some(key) = raw.default_key {
            let parsed = key
                .parse::<Key>()
                .map_err(|_| ChordError::Config(format!("default-key '{}' is not a key", key)))?;
            config.default_key = Some(parsed);
        }

        Ok(config)
    }

    /// Spelling for `key`, else the configured default key, else sharps.
    pub fn spelling_for(&self, key: Option<&Key>) -> SpellingPreference {
        key.or(self.default_key.as_ref())
            .map(Key::spelling_preference)
            .unwrap_or_default()
    }
}
