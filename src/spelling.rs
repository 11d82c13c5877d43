//! Enharmonic spelling of pitch classes.
//!
//! Spelling is decided once, from an integer pitch class and an explicit
//! [`SpellingPreference`]. Text is produced in ASCII first (`F##`, `Bb`) and
//! only converted to Unicode glyphs by [`glyphs()`] as a final pass.

use crate::theory::{Accidental, Letter, PitchClass, SpelledNote, SpellingPreference};
use serde::Serialize;

const SHARP_SPELLINGS: [SpelledNote; 12] = [
    SpelledNote::new(Letter::C, 0),
    SpelledNote::new(Letter::C, 1),
    SpelledNote::new(Letter::D, 0),
    SpelledNote::new(Letter::D, 1),
    SpelledNote::new(Letter::E, 0),
    SpelledNote::new(Letter::F, 0),
    SpelledNote::new(Letter::F, 1),
    SpelledNote::new(Letter::G, 0),
    SpelledNote::new(Letter::G, 1),
    SpelledNote::new(Letter::A, 0),
    SpelledNote::new(Letter::A, 1),
    SpelledNote::new(Letter::B, 0),
];

const FLAT_SPELLINGS: [SpelledNote; 12] = [
    SpelledNote::new(Letter::C, 0),
    SpelledNote::new(Letter::D, -1),
    SpelledNote::new(Letter::D, 0),
    SpelledNote::new(Letter::E, -1),
    SpelledNote::new(Letter::E, 0),
    SpelledNote::new(Letter::F, 0),
    SpelledNote::new(Letter::G, -1),
    SpelledNote::new(Letter::G, 0),
    SpelledNote::new(Letter::A, -1),
    SpelledNote::new(Letter::A, 0),
    SpelledNote::new(Letter::B, -1),
    SpelledNote::new(Letter::B, 0),
];

/// How accidentals appear in rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccidentalStyle {
    /// `♯ ♭ 𝄪 𝄫`
    #[default]
    Unicode,
    /// `# b ## bb`
    Ascii,
}

impl AccidentalStyle {
    /// Parse a style name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "unicode" => Some(AccidentalStyle::Unicode),
            "ascii" => Some(AccidentalStyle::Ascii),
            _ => None,
        }
    }

    /// Single accidental mark in this style
    pub fn mark(self, accidental: Accidental) -> char {
        match (self, accidental) {
            (AccidentalStyle::Unicode, Accidental::Flat) => '♭',
            (AccidentalStyle::Unicode, Accidental::Sharp) => '♯',
            (AccidentalStyle::Ascii, acc) => acc.ascii(),
        }
    }

    /// Apply this style to intermediate ASCII text.
    pub fn apply(self, ascii: &str) -> String {
        match self {
            AccidentalStyle::Unicode => glyphs(ascii),
            AccidentalStyle::Ascii => ascii.to_string(),
        }
    }
}

/// Name a pitch class with sharps or flats.
///
/// Naturals are identical in both tables; only the five black keys differ.
pub fn spell(pitch: PitchClass, preference: SpellingPreference) -> SpelledNote {
    match preference {
        SpellingPreference::Sharp => SHARP_SPELLINGS[pitch.value() as usize],
        SpellingPreference::Flat => FLAT_SPELLINGS[pitch.value() as usize],
    }
}

/// [`spell()`] rendered to text in the given style.
pub fn spell_text(pitch: PitchClass, preference: SpellingPreference, style: AccidentalStyle) -> String {
    render_note(&spell(pitch, preference), style)
}

pub fn render_note(note: &SpelledNote, style: AccidentalStyle) -> String {
    style.apply(&note.ascii())
}

/// Replace ASCII accidental tokens with Unicode glyphs.
///
/// Only runs of `#`/`b` directly following a note letter (`A`-`G`) are
/// rewritten. Within a run, each pair becomes one double glyph (`##` → `𝄪`,
/// `bb` → `𝄫`) and a leftover single mark becomes `♯`/`♭`.
///
/// ```
/// use chord_engine::spelling::glyphs;
///
/// assert_eq!(glyphs("F##"), "F𝄪");
/// assert_eq!(glyphs("Bbm7"), "B♭m7");
/// assert_eq!(glyphs("Ebb"), "E𝄫");
/// assert_eq!(glyphs("Cadd9"), "Cadd9");
/// ```
pub fn glyphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if Letter::from_char(c).is_none() {
            continue;
        }

        while let Some(&mark) = chars.peek() {
            if mark != '#' && mark != 'b' {
                break;
            }
            chars.next();
            let doubled = chars.peek() == Some(&mark);
            if doubled {
                chars.next();
            }
            out.push(match (mark, doubled) {
                ('#', true) => '𝄪',
                ('#', false) => '♯',
                (_, true) => '𝄫',
                (_, false) => '♭',
            });
        }
    }

    out
}
