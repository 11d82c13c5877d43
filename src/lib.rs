//! Chord notation engine for play-along song display.
//!
//! Turns detected chord labels (`"Gm7"`, `"C:maj/3"`, `"F#m/b7"`) into display
//! symbols with correctly spelled bass notes, transposes and simplifies them,
//! and lines chord changes up with the beat grid.

pub mod align;
pub mod chord;
pub mod config;
pub mod engine;
pub mod error;
pub mod inversion;
pub mod key;
pub mod parser;
pub mod quality;
pub mod simplify;
pub mod spelling;
pub mod theory;
pub mod transpose;

pub use align::{align_chords_to_beats, AlignedSequence, BeatEvent, ChordEvent, NO_CHORD_LABEL};
pub use chord::{Inversion, InversionSpec, ParsedChord};
pub use config::EngineConfig;
pub use engine::ChordEngine;
pub use error::*;
pub use inversion::{resolve_bass, ResolvedBass};
pub use key::{Key, Mode};
pub use parser::parse_chord;
pub use quality::{normalize_quality, ChordQuality};
pub use simplify::{simplify_label, SimpleQuality};
pub use spelling::AccidentalStyle;
pub use theory::{Accidental, Letter, PitchClass, SpelledNote, SpellingPreference};
pub use transpose::{instrument_offset, semitones_between, transpose_label};

/// Render a chord label for display with its bass note resolved.
/// This is the main entry point for the library.
pub fn format_label(text: &str) -> String {
    parse_chord(text).display_label(AccidentalStyle::Unicode)
}

/// Transpose a label, spelling the result for `key`.
pub fn transpose_in_key(text: &str, semitones: i32, key: &str) -> Result<String, ChordError> {
    let key: Key = key.parse()?;
    Ok(transpose_label(
        text,
        semitones,
        key.spelling_preference(),
        AccidentalStyle::Unicode,
    ))
}
