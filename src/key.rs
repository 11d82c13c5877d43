//! Key context for spelling decisions
//!
//! The key-detection service reports keys as text (`"Bb"`, `"F#m"`,
//! `"E minor"`, `"A:min"`). A [`Key`] turns that into a position on the circle
//! of fifths, which decides whether transposed chords are spelled with sharps
//! or flats.

use crate::error::ChordError;
use crate::parser::parse_note;
use crate::theory::{PitchClass, SpelledNote, SpellingPreference};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Mode of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// A key: tonic, mode and its signature as a count of fifths
/// (positive = sharps, negative = flats)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Key {
    pub tonic: SpelledNote,
    pub mode: Mode,
    pub fifths: i32,
}

impl Key {
    pub fn new(tonic: SpelledNote, mode: Mode) -> Self {
        // F=-1 C=0 G=1 … B=5; each sharp on the tonic adds 7 fifths
        let major_fifths = tonic.letter.fifths() + 7 * tonic.alteration as i32;
        let fifths = match mode {
            Mode::Major => major_fifths,
            // relative major lies three fifths clockwise of the minor tonic
            Mode::Minor => major_fifths - 3,
        };
        Self { tonic, mode, fifths }
    }

    pub fn tonic_pitch(&self) -> PitchClass {
        self.tonic.pitch_class()
    }

    /// Flat keys spell with flats; C major / A minor and sharp keys with sharps.
    pub fn spelling_preference(&self) -> SpellingPreference {
        if self.fifths < 0 {
            SpellingPreference::Flat
        } else {
            SpellingPreference::Sharp
        }
    }
}

impl FromStr for Key {
    type Err = ChordError;

    /// Parse a key name.
    ///
    /// Supports `"G"`, `"Bb"`, `"F#m"`, `"Ebm"`, `"E minor"`, `"Ab major"`,
    /// `"A:min"` and Unicode accidentals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unknown = || ChordError::UnknownKey(s.to_string());

        let (tonic_text, mode) = split_mode(trimmed).ok_or_else(unknown)?;
        let tonic = parse_note(tonic_text).ok_or_else(unknown)?;
        Ok(Key::new(tonic, mode))
    }
}

/// Split `"F# minor"`, `"F#m"`, `"F#:min"` into tonic text and mode.
fn split_mode(text: &str) -> Option<(&str, Mode)> {
    let (tonic, mode_text) = match text.split_once(|c: char| c == ':' || c.is_whitespace()) {
        Some((tonic, rest)) => (tonic, rest.trim()),
        None => {
            // "F#m": tonic is a letter plus optional accidentals
            let split = text
                .char_indices()
                .skip(1)
                .find(|(_, c)| !matches!(c, '#' | 'b' | '♯' | '♭'))
                .map_or(text.len(), |(idx, _)| idx);
            (&text[..split], &text[split..])
        }
    };

    // "M" is the only case-sensitive spelling
    if mode_text == "M" {
        return Some((tonic, Mode::Major));
    }
    let mode = match mode_text.to_lowercase().as_str() {
        "" | "maj" | "major" => Mode::Major,
        "m" | "min" | "minor" => Mode::Minor,
        _ => return None,
    };
    Some((tonic, mode))
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Major => write!(f, "{}", self.tonic),
            Mode::Minor => write!(f, "{}m", self.tonic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fifths(name: &str) -> i32 {
        name.parse::<Key>().unwrap().fifths
    }

    #[test]
    fn test_major_keys() {
        assert_eq!(fifths("C"), 0);
        assert_eq!(fifths("G"), 1);
        assert_eq!(fifths("F#"), 6);
        assert_eq!(fifths("C#"), 7);
        assert_eq!(fifths("F"), -1);
        assert_eq!(fifths("Bb"), -2);
        assert_eq!(fifths("Eb"), -3);
        assert_eq!(fifths("Cb"), -7);
    }

    #[test]
    fn test_minor_keys() {
        assert_eq!(fifths("Am"), 0);
        assert_eq!(fifths("Em"), 1);
        assert_eq!(fifths("G#m"), 5);
        assert_eq!(fifths("Dm"), -1);
        assert_eq!(fifths("Ebm"), -6);
        assert_eq!(fifths("C minor"), -3);
        assert_eq!(fifths("F#:min"), 3);
    }

    #[test]
    fn test_long_and_unicode_names() {
        assert_eq!(fifths("Ab major"), -4);
        assert_eq!(fifths("B♭ Major"), -2);
        assert_eq!(fifths("E minor"), 1);
        let key: Key = "F♯m".parse().unwrap();
        assert_eq!(key.mode, Mode::Minor);
        assert_eq!(key.tonic_pitch().value(), 6);
    }

    #[test]
    fn test_spelling_preference() {
        assert_eq!("C".parse::<Key>().unwrap().spelling_preference(), SpellingPreference::Sharp);
        assert_eq!("D".parse::<Key>().unwrap().spelling_preference(), SpellingPreference::Sharp);
        assert_eq!("F".parse::<Key>().unwrap().spelling_preference(), SpellingPreference::Flat);
        assert_eq!("Gm".parse::<Key>().unwrap().spelling_preference(), SpellingPreference::Flat);
        assert_eq!("Am".parse::<Key>().unwrap().spelling_preference(), SpellingPreference::Sharp);
    }

    #[test]
    fn test_unknown_keys() {
        assert!("H".parse::<Key>().is_err());
        assert!("C dorian".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
        assert!(matches!("X".parse::<Key>(), Err(ChordError::UnknownKey(name)) if name == "X"));
    }

    #[test]
    fn test_display() {
        assert_eq!("Bb".parse::<Key>().unwrap().to_string(), "B♭");
        assert_eq!("F#:min".parse::<Key>().unwrap().to_string(), "F♯m");
    }
}
