//! # Interval Table
//!
//! Static music-theory data shared by every other module.
//!
//! ## Contents
//! - [`PitchClass`] - one of the 12 equal-tempered note identities (C=0 … B=11)
//! - [`Letter`] - the seven natural note letters, with letter arithmetic
//! - [`Accidental`] - a single sharp or flat
//! - [`SpellingPreference`] - sharp or flat context for naming black keys
//! - [`SpelledNote`] - a letter plus an alteration count (`F##`, `Bb`, `E`)
//! - [`degree_offset()`] - scale degree → semitone offset above the root
//!
//! ## Letter Arithmetic
//! Interval spelling works on letters first and pitches second. The 7th above
//! `G#` is always some kind of `F` (G A B C D E **F**); its alteration is then
//! whatever distance separates natural `F` from the computed pitch:
//!
//! ```text
//! G# (8) + major 7th (11) = 19 mod 12 = 7
//! F natural = 5  →  alteration +2  →  F##
//! ```

use serde::Serialize;
use std::fmt;

/// Scale degrees that may appear after a slash in degree notation (`C/b7`).
pub const SUPPORTED_DEGREES: [u8; 7] = [2, 3, 4, 5, 6, 7, 9];

/// A pitch class, always in `0..12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Wrap any integer onto the 12-tone circle.
    pub fn new(value: i32) -> Self {
        PitchClass(value.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Move by a signed number of semitones.
    pub fn shift(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Signed distance from `self` up or down to `other`, in `-5..=6`.
    pub fn interval_to(self, other: PitchClass) -> i32 {
        let up = (other.0 as i32 - self.0 as i32).rem_euclid(12);
        if up > 6 {
            up - 12
        } else {
            up
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Natural note letters in scale order starting from C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Letter {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

const LETTERS: [Letter; 7] = [
    Letter::C,
    Letter::D,
    Letter::E,
    Letter::F,
    Letter::G,
    Letter::A,
    Letter::B,
];

impl Letter {
    /// Parse an uppercase note letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Pitch class of the natural (unaltered) letter
    pub fn natural(self) -> PitchClass {
        PitchClass::new(match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        })
    }

    /// Letter `steps` scale positions above this one (`G.step(6) == F`).
    pub fn step(self, steps: usize) -> Letter {
        LETTERS[(self as usize + steps) % LETTERS.len()]
    }

    /// Position on the circle of fifths relative to C (F = -1 … B = 5).
    pub fn fifths(self) -> i32 {
        match self {
            Letter::F => -1,
            Letter::C => 0,
            Letter::G => 1,
            Letter::D => 2,
            Letter::A => 3,
            Letter::E => 4,
            Letter::B => 5,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single accidental written in chord text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Flat,
    Sharp,
}

impl Accidental {
    /// Accepts both ASCII (`#`, `b`) and Unicode (`♯`, `♭`) forms.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' | '♯' => Some(Accidental::Sharp),
            'b' | '♭' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn semitones(self) -> i32 {
        match self {
            Accidental::Flat => -1,
            Accidental::Sharp => 1,
        }
    }

    pub fn ascii(self) -> char {
        match self {
            Accidental::Flat => 'b',
            Accidental::Sharp => '#',
        }
    }
}

/// Whether black keys are named with sharps or flats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellingPreference {
    #[default]
    Sharp,
    Flat,
}

impl SpellingPreference {
    /// Preference implied by an accidental; no accidental counts as flat.
    pub fn for_alteration(alteration: i8) -> Self {
        if alteration > 0 {
            SpellingPreference::Sharp
        } else {
            SpellingPreference::Flat
        }
    }
}

/// A note name: letter plus a signed number of sharps (positive) or flats
/// (negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SpelledNote {
    pub letter: Letter,
    pub alteration: i8,
}

impl SpelledNote {
    pub const fn new(letter: Letter, alteration: i8) -> Self {
        Self { letter, alteration }
    }

    /// Spell `pitch` on a fixed `letter`, choosing whatever alteration lands on it.
    pub fn on_letter(letter: Letter, pitch: PitchClass) -> Self {
        Self {
            letter,
            alteration: letter.natural().interval_to(pitch) as i8,
        }
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.letter.natural().shift(self.alteration as i32)
    }

    /// Preference this note sets as a chord root: its accidental, or for a
    /// natural, the side of the circle of fifths its major key lies on
    /// (G D A E B sharp, C F flat).
    pub fn spelling(&self) -> SpellingPreference {
        match self.alteration {
            0 if self.letter.fifths() > 0 => SpellingPreference::Sharp,
            alteration => SpellingPreference::for_alteration(alteration),
        }
    }

    /// Intermediate ASCII text (`F##`, `Bb`, `E`) before the glyph pass.
    pub fn ascii(&self) -> String {
        let mut out = String::with_capacity(1 + self.alteration.unsigned_abs() as usize);
        out.push(self.letter.as_char());
        let mark = if self.alteration > 0 { '#' } else { 'b' };
        for _ in 0..self.alteration.unsigned_abs() {
            out.push(mark);
        }
        out
    }
}

impl fmt::Display for SpelledNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::spelling::glyphs(&self.ascii()))
    }
}

/// Semitone offset of a scale degree above the root.
///
/// Degree 3 depends on the chord: 3 semitones when the chord's third is
/// already minor, 4 otherwise. Degree 9 is returned unreduced (14); callers
/// reduce modulo 12 through [`PitchClass`].
pub fn degree_offset(degree: u8, minor_third: bool) -> Option<i32> {
    match degree {
        2 => Some(2),
        3 => Some(if minor_third { 3 } else { 4 }),
        4 => Some(5),
        5 => Some(7),
        6 => Some(9),
        7 => Some(11),
        9 => Some(14),
        _ => None,
    }
}
