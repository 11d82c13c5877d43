//! # Quality Normalizer
//!
//! Maps the many ways people write a chord quality onto a closed set of
//! canonical qualities.
//!
//! ## Matching
//! Aliases live in one ordered table. Lookup picks the **longest** alias that
//! either equals the whole text or is followed only by an extension tail
//! (`(9)`, `add11`, `b9`, `#11`). Checking order never matters, so `maj7` can
//! never be taken for a minor chord just because it begins with `m`.
//!
//! | Input                      | Canonical |
//! |----------------------------|-----------|
//! | `""`, `maj`, `M`, `Δ`      | `""`      |
//! | `m`, `min`, `-`            | `m`       |
//! | `maj7`, `M7`, `Δ7`, `△7`   | `maj7`    |
//! | `m7`, `min7`, `-7`         | `m7`      |
//! | `dim`, `°`, `dim7`, `ø`    | `dim`     |
//! | `sus`, `sus4`              | `sus4`    |
//! | `add9`, `9`                | `9`       |
//!
//! Anything else becomes [`ChordQuality::Unrecognized`] carrying the original
//! text.

use serde::Serialize;
use std::fmt;

/// Canonical chord quality
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ChordQuality {
    #[default]
    Major,
    Minor,
    Augmented,
    Diminished,
    Sus2,
    Sus4,
    Dominant7,
    Major7,
    Minor7,
    Sixth,
    MinorSixth,
    Ninth,
    Major9,
    Minor9,
    Eleventh,
    Thirteenth,
    /// Text the normalizer could not classify, kept verbatim
    Unrecognized(String),
}

impl ChordQuality {
    /// Canonical suffix written after the root
    pub fn suffix(&self) -> &str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Augmented => "aug",
            ChordQuality::Diminished => "dim",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Sixth => "6",
            ChordQuality::MinorSixth => "m6",
            ChordQuality::Ninth => "9",
            ChordQuality::Major9 => "maj9",
            ChordQuality::Minor9 => "m9",
            ChordQuality::Eleventh => "11",
            ChordQuality::Thirteenth => "13",
            ChordQuality::Unrecognized(text) => text,
        }
    }

    /// Minor triad family (m, m6, m7, m9)
    pub fn is_minor_flavored(&self) -> bool {
        matches!(
            self,
            ChordQuality::Minor | ChordQuality::MinorSixth | ChordQuality::Minor7 | ChordQuality::Minor9
        )
    }

    /// Major triad family, including dominant and extended chords
    pub fn is_major_flavored(&self) -> bool {
        matches!(
            self,
            ChordQuality::Major
                | ChordQuality::Dominant7
                | ChordQuality::Major7
                | ChordQuality::Sixth
                | ChordQuality::Ninth
                | ChordQuality::Major9
                | ChordQuality::Eleventh
                | ChordQuality::Thirteenth
        )
    }

    /// Whether the chord's third is a minor third (minor family and diminished)
    pub fn has_minor_third(&self) -> bool {
        self.is_minor_flavored() || *self == ChordQuality::Diminished
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ChordQuality::Unrecognized(_))
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

static QUALITY_ALIASES: &[(&str, ChordQuality)] = &[
    // Major triad
    ("", ChordQuality::Major),
    ("maj", ChordQuality::Major),
    ("M", ChordQuality::Major),
    ("Δ", ChordQuality::Major),
    ("△", ChordQuality::Major),
    ("5", ChordQuality::Major),
    ("1", ChordQuality::Major),
    // Minor triad
    ("m", ChordQuality::Minor),
    ("mi", ChordQuality::Minor),
    ("min", ChordQuality::Minor),
    ("-", ChordQuality::Minor),
    ("mM7", ChordQuality::Minor),
    ("mmaj7", ChordQuality::Minor),
    ("minmaj7", ChordQuality::Minor),
    // Augmented
    ("aug", ChordQuality::Augmented),
    ("+", ChordQuality::Augmented),
    ("aug7", ChordQuality::Augmented),
    ("+7", ChordQuality::Augmented),
    // Diminished, including half-diminished spellings
    ("dim", ChordQuality::Diminished),
    ("°", ChordQuality::Diminished),
    ("o", ChordQuality::Diminished),
    ("dim7", ChordQuality::Diminished),
    ("°7", ChordQuality::Diminished),
    ("o7", ChordQuality::Diminished),
    ("ø", ChordQuality::Diminished),
    ("ø7", ChordQuality::Diminished),
    ("hdim", ChordQuality::Diminished),
    ("hdim7", ChordQuality::Diminished),
    ("m7b5", ChordQuality::Diminished),
    ("min7b5", ChordQuality::Diminished),
    ("-7b5", ChordQuality::Diminished),
    // Suspended
    ("sus2", ChordQuality::Sus2),
    ("sus", ChordQuality::Sus4),
    ("sus4", ChordQuality::Sus4),
    ("7sus", ChordQuality::Sus4),
    ("7sus4", ChordQuality::Sus4),
    // Sevenths
    ("7", ChordQuality::Dominant7),
    ("dom7", ChordQuality::Dominant7),
    ("maj7", ChordQuality::Major7),
    ("M7", ChordQuality::Major7),
    ("Δ7", ChordQuality::Major7),
    ("△7", ChordQuality::Major7),
    ("ma7", ChordQuality::Major7),
    ("m7", ChordQuality::Minor7),
    ("mi7", ChordQuality::Minor7),
    ("min7", ChordQuality::Minor7),
    ("-7", ChordQuality::Minor7),
    // Sixths
    ("6", ChordQuality::Sixth),
    ("maj6", ChordQuality::Sixth),
    ("M6", ChordQuality::Sixth),
    ("69", ChordQuality::Sixth),
    ("m6", ChordQuality::MinorSixth),
    ("min6", ChordQuality::MinorSixth),
    ("-6", ChordQuality::MinorSixth),
    // Ninths
    ("9", ChordQuality::Ninth),
    ("add9", ChordQuality::Ninth),
    ("add2", ChordQuality::Ninth),
    ("maj9", ChordQuality::Major9),
    ("M9", ChordQuality::Major9),
    ("Δ9", ChordQuality::Major9),
    ("△9", ChordQuality::Major9),
    ("m9", ChordQuality::Minor9),
    ("min9", ChordQuality::Minor9),
    ("-9", ChordQuality::Minor9),
    // Upper extensions
    ("11", ChordQuality::Eleventh),
    ("13", ChordQuality::Thirteenth),
];

/// Whether `tail` only adds color tones to an already-classified chord
/// (`(9)`, `add11`, `b9`, `#11`, `(b7)`), never changing its family.
fn is_extension_tail(tail: &str) -> bool {
    let mut rest = tail;
    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix('(') {
            match inner.find(')') {
                Some(end) => rest = &inner[end + 1..],
                None => return false,
            }
        } else if let Some(after) = rest.strip_prefix("add") {
            rest = strip_digits(after);
            if rest.len() == after.len() {
                return false;
            }
        } else if let Some(after_mark) = rest.strip_prefix(['b', '#', '♭', '♯']) {
            let after = strip_digits(after_mark);
            if after.len() == after_mark.len() {
                return false;
            }
            rest = after;
        } else if let Some(after) = rest.strip_prefix(',') {
            rest = after;
        } else {
            return false;
        }
    }
    true
}

fn strip_digits(text: &str) -> &str {
    text.trim_start_matches(|c: char| c.is_ascii_digit())
}

/// Classify raw quality text.
///
/// # Examples
/// ```
/// use chord_engine::quality::{normalize_quality, ChordQuality};
///
/// assert_eq!(normalize_quality("min7"), ChordQuality::Minor7);
/// assert_eq!(normalize_quality("maj7"), ChordQuality::Major7);
/// assert_eq!(normalize_quality("7(b9)"), ChordQuality::Dominant7);
/// assert_eq!(
///     normalize_quality("blues"),
///     ChordQuality::Unrecognized("blues".to_string())
/// );
/// ```
pub fn normalize_quality(text: &str) -> ChordQuality {
    let trimmed = text.trim();

    let best = QUALITY_ALIASES
        .iter()
        .filter(|(alias, _)| {
            trimmed
                .strip_prefix(alias)
                .map_or(false, |tail| tail.is_empty() || is_extension_tail(tail))
        })
        .max_by_key(|(alias, _)| alias.len());

    match best {
        Some((_, quality)) => quality.clone(),
        None => {
            tracing::trace!(quality = trimmed, "unrecognized chord quality");
            ChordQuality::Unrecognized(text.to_string())
        }
    }
}

/// Explicit minor prefix: `m`, `min` or `-`, but never `maj`.
///
/// Used to bucket qualities the alias table does not know; a bare substring
/// test for `m` would misread `maj7`.
pub fn has_minor_prefix(text: &str) -> bool {
    let text = text.trim_start();
    if text.starts_with("maj") || text.starts_with("ma7") {
        return false;
    }
    text.starts_with("min") || text.starts_with('m') || text.starts_with('-')
}
