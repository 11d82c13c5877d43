//! # Chord Engine
//!
//! Bundles the parser, transposer, simplifier and beat aligner behind one
//! configured value, so callers pick the accidental style, no-chord label and
//! fallback key once.
//!
//! ## Usage
//! ```rust
//! use chord_engine::{ChordEngine, EngineConfig};
//!
//! let engine = ChordEngine::new(EngineConfig::from_yaml("default-key: F").unwrap());
//! assert_eq!(engine.transpose("C7", 1, None), "D♭7");
//! assert_eq!(engine.simplify("Dm7/b3"), "Dm");
//! ```

use crate::align::{align_with_label, AlignedSequence, BeatEvent, ChordEvent};
use crate::chord::ParsedChord;
use crate::config::EngineConfig;
use crate::error::ChordError;
use crate::key::Key;
use crate::parser::parse_chord;
use crate::simplify::simplify;
use crate::transpose::{semitones_between, transpose, transpose_label};
use serde::Deserialize;

/// Beats as delivered by the detection backend: bare timestamps or indexed
/// events.
#[derive(Deserialize)]
#[serde(untagged)]
enum BeatsInput {
    Times(Vec<f64>),
    Events(Vec<BeatEvent>),
}

impl BeatsInput {
    fn into_events(self) -> Vec<BeatEvent> {
        match self {
            BeatsInput::Times(times) => BeatEvent::from_times(&times),
            BeatsInput::Events(events) => events,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChordEngine {
    config: EngineConfig,
}

impl ChordEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parse(&self, text: &str) -> ParsedChord {
        parse_chord(text)
    }

    /// Display label with the bass resolved, in the configured style.
    pub fn format(&self, chord: &ParsedChord) -> String {
        chord.display_label(self.config.accidentals)
    }

    /// Transpose one label. Spelling follows `key`, then the configured
    /// default key, then sharps.
    pub fn transpose(&self, text: &str, semitones: i32, key: Option<&Key>) -> String {
        transpose_label(
            text,
            semitones,
            self.config.spelling_for(key),
            self.config.accidentals,
        )
    }

    /// Move a label from one key to another, spelled for the destination.
    pub fn transpose_between(&self, text: &str, from: &Key, to: &Key) -> String {
        self.transpose(text, semitones_between(from, to), Some(to))
    }

    /// Transpose an already parsed chord.
    pub fn transpose_chord(
        &self,
        chord: &ParsedChord,
        semitones: i32,
        key: Option<&Key>,
    ) -> ParsedChord {
        transpose(chord, semitones, self.config.spelling_for(key))
    }

    pub fn simplify(&self, text: &str) -> String {
        simplify(&parse_chord(text), self.config.accidentals)
    }

    pub fn align(&self, chords: &[ChordEvent], beats: &[BeatEvent]) -> AlignedSequence {
        align_with_label(chords, beats, &self.config.no_chord_label)
    }

    /// Align chord and beat events given as JSON.
    ///
    /// `beats_json` may be a list of timestamps or of `{index, time}` objects.
    ///
    /// ```
    /// use chord_engine::ChordEngine;
    ///
    /// let engine = ChordEngine::default();
    /// let aligned = engine
    ///     .align_json(r#"[{"start": 0.5, "chord": "Gm7"}]"#, "[0.0, 0.5, 1.0]")
    ///     .unwrap();
    /// assert_eq!(aligned.labels(), ["N/C", "Gm7", "Gm7"]);
    /// ```
    pub fn align_json(
        &self,
        chords_json: &str,
        beats_json: &str,
    ) -> Result<AlignedSequence, ChordError> {
        let chords: Vec<ChordEvent> = serde_json::from_str(chords_json)
            .map_err(|e| ChordError::Input(format!("chord events: {}", e)))?;
        let beats: BeatsInput = serde_json::from_str(beats_json)
            .map_err(|e| ChordError::Input(format!("beat events: {}", e)))?;
        let beats = beats.into_events();

        if chords
            .windows(2)
            .any(|pair| pair[1].start_time < pair[0].start_time)
        {
            tracing::warn!("chord events are not sorted by start time");
        }

        Ok(self.align(&chords, &beats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::AccidentalStyle;

    fn ascii_engine() -> ChordEngine {
        ChordEngine::new(EngineConfig {
            accidentals: AccidentalStyle::Ascii,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_format_resolves_bass() {
        let engine = ChordEngine::default();
        let chord = engine.parse("G#m/7");
        assert_eq!(engine.format(&chord), "G♯m/F𝄪");
        assert_eq!(ascii_engine().format(&chord), "G#m/F##");
    }

    #[test]
    fn test_transpose_uses_key_then_default() {
        let engine = ChordEngine::default();
        assert_eq!(engine.transpose("C", 1, None), "C♯");

        let eb: Key = "Eb".parse().unwrap();
        assert_eq!(engine.transpose("C", 1, Some(&eb)), "D♭");

        let engine = ChordEngine::new(EngineConfig::from_yaml("default-key: Dm").unwrap());
        assert_eq!(engine.transpose("C", 1, None), "D♭");
    }

    #[test]
    fn test_transpose_between_keys() {
        let engine = ascii_engine();
        let c: Key = "C".parse().unwrap();
        let bb: Key = "Bb".parse().unwrap();
        assert_eq!(engine.transpose_between("G7/B", &c, &bb), "F7/A");
        assert_eq!(engine.transpose_between("Am/b3", &c, &bb), "Gm/Bb");
    }

    #[test]
    fn test_simplify_uses_style() {
        assert_eq!(ascii_engine().simplify("Bbmaj7"), "Bb");
        assert_eq!(ChordEngine::default().simplify("Bbmaj7"), "B♭");
    }

    #[test]
    fn test_align_uses_configured_label() {
        let engine = ChordEngine::new(EngineConfig::from_yaml("no-chord-label: '-'").unwrap());
        let chords = vec![ChordEvent::new(1.0, 2.0, "C")];
        let beats = BeatEvent::from_times(&[0.0, 1.0]);
        assert_eq!(engine.align(&chords, &beats).labels(), ["-", "C"]);
    }

    #[test]
    fn test_align_json_accepts_both_beat_shapes() {
        let engine = ChordEngine::default();
        let chords = r#"[{"startTime": 0.0, "endTime": 1.0, "label": "C"},
                         {"startTime": 1.0, "endTime": 2.0, "label": "G"}]"#;
        let from_times = engine.align_json(chords, "[0.0, 1.0, 2.0]").unwrap();
        let from_events = engine
            .align_json(
                chords,
                r#"[{"index": 0, "time": 0.0}, {"index": 1, "time": 1.0}, {"index": 2, "time": 2.0}]"#,
            )
            .unwrap();
        assert_eq!(from_times, from_events);
        assert_eq!(from_times.labels(), ["C", "G", "G"]);
    }

    #[test]
    fn test_align_json_rejects_malformed_input() {
        let engine = ChordEngine::default();
        assert!(matches!(
            engine.align_json("{", "[]"),
            Err(ChordError::Input(_))
        ));
        assert!(matches!(
            engine.align_json("[]", r#"{"beats": 3}"#),
            Err(ChordError::Input(_))
        ));
    }
}
