//! # Chord Data Model
//!
//! Types produced by the parser and consumed by every other component.
//!
//! ## Type Hierarchy
//! ```text
//! ParsedChord
//!   ├── root: PitchClass (0-11)
//!   ├── root_spelling: SpellingPreference (Sharp | Flat)
//!   ├── root_name: Option<SpelledNote> (None for no-chord and root-less text)
//!   ├── quality: ChordQuality
//!   ├── inversion: Option<Inversion>
//!   │     ├── Degree(InversionSpec)   C/b7, G#m/3
//!   │     ├── Note(SpelledNote)       C/E, Bb/D
//!   │     └── Unsupported(String)     C/8, C/x (kept verbatim)
//!   ├── is_no_chord: bool
//!   └── raw: String
//! ```
//!
//! ## Rendering
//! - [`ParsedChord::symbol()`] (and `Display`) writes the canonical symbol and
//!   keeps degree notation: `G♯m/7`.
//! - [`ParsedChord::display_label()`] resolves the bass note: `G♯m/F𝄪`.
//!
//! No-chord sentinels and root-less text always render as `raw`, untouched.

use crate::inversion::{render_inversion, resolve_bass_from, ResolvedBass};
use crate::quality::ChordQuality;
use crate::spelling::{render_note, AccidentalStyle};
use crate::theory::{Accidental, PitchClass, SpelledNote, SpellingPreference, SUPPORTED_DEGREES};
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Degree notation after a slash (`b7`, `3`, `#4`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InversionSpec {
    pub degree: u8,
    pub accidental: Option<Accidental>,
}

impl InversionSpec {
    /// Returns `None` for degrees outside 2, 3, 4, 5, 6, 7, 9.
    pub fn new(degree: u8, accidental: Option<Accidental>) -> Option<Self> {
        SUPPORTED_DEGREES
            .contains(&degree)
            .then_some(Self { degree, accidental })
    }

    pub fn render(&self, style: AccidentalStyle) -> String {
        match self.accidental {
            Some(acc) => format!("{}{}", style.mark(acc), self.degree),
            None => self.degree.to_string(),
        }
    }
}

/// What follows the slash in a slash chord
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Inversion {
    Degree(InversionSpec),
    Note(SpelledNote),
    /// Inversion text that could not be interpreted, kept verbatim
    Unsupported(String),
}

/// A chord symbol broken into its parts
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedChord {
    pub root: PitchClass,
    pub root_spelling: SpellingPreference,
    pub root_name: Option<SpelledNote>,
    pub quality: ChordQuality,
    pub inversion: Option<Inversion>,
    pub is_no_chord: bool,
    pub raw: String,
}

impl ParsedChord {
    /// A chord with a recognized root.
    pub fn new(
        root_name: SpelledNote,
        root_spelling: SpellingPreference,
        quality: ChordQuality,
        inversion: Option<Inversion>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            root: root_name.pitch_class(),
            root_spelling,
            root_name: Some(root_name),
            quality,
            inversion,
            is_no_chord: false,
            raw: raw.into(),
        }
    }

    /// `N`, `N.C.`, `N/C` or empty text. Every other field stays default.
    pub fn no_chord(raw: impl Into<String>) -> Self {
        Self {
            is_no_chord: true,
            raw: raw.into(),
            ..Self::default()
        }
    }

    /// Text without a recognizable root, passed through verbatim.
    pub fn unrecognized(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            quality: ChordQuality::Unrecognized(raw.clone()),
            raw,
            ..Self::default()
        }
    }

    pub fn has_root(&self) -> bool {
        !self.is_no_chord && self.root_name.is_some()
    }

    /// Bass note of a degree inversion (`C/b7` → B♭).
    ///
    /// `None` when there is no inversion, when the bass is written as a note
    /// name, or when the degree is unsupported.
    pub fn bass(&self) -> Option<ResolvedBass> {
        let root_name = self.root_name.filter(|_| !self.is_no_chord)?;
        match &self.inversion {
            Some(Inversion::Degree(spec)) => {
                resolve_bass_from(root_name, self.root_spelling, &self.quality, spec)
            }
            _ => None,
        }
    }

    /// Canonical symbol, keeping degree notation (`F♯m7/♭7`).
    pub fn symbol(&self, style: AccidentalStyle) -> String {
        let Some(root_name) = self.root_name.filter(|_| !self.is_no_chord) else {
            return self.raw.clone();
        };

        let mut out = render_note(&root_name, style);
        out.push_str(self.quality.suffix());
        if let Some(inversion) = &self.inversion {
            out.push('/');
            match inversion {
                Inversion::Degree(spec) => out.push_str(&spec.render(style)),
                Inversion::Note(note) => out.push_str(&render_note(note, style)),
                Inversion::Unsupported(text) => out.push_str(text),
            }
        }
        out
    }

    /// Symbol with the bass note resolved to a name (`C/B♭`).
    pub fn display_label(&self, style: AccidentalStyle) -> String {
        let Some(root_name) = self.root_name.filter(|_| !self.is_no_chord) else {
            return self.raw.clone();
        };

        let mut out = render_note(&root_name, style);
        out.push_str(self.quality.suffix());
        if let Some(bass) = render_inversion(self, style) {
            out.push('/');
            out.push_str(&bass);
        }
        out
    }
}

impl fmt::Display for ParsedChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol(AccidentalStyle::Unicode))
    }
}

impl FromStr for ParsedChord {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(crate::parser::parse_chord(s))
    }
}
