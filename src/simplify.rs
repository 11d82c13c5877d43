//! Chord simplification
//!
//! Reduces any chord to one of five basic classes for beginner-friendly
//! display: `C`, `Cm`, `Caug`, `Cdim`, `Csus`. Extensions and slash basses are
//! dropped. Simplifying a simplified chord changes nothing.

use crate::chord::ParsedChord;
use crate::parser::parse_chord;
use crate::quality::{has_minor_prefix, ChordQuality};
use crate::spelling::{render_note, spell_text, AccidentalStyle};
use serde::Serialize;

/// The five simplified chord classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimpleQuality {
    Major,
    Minor,
    Augmented,
    Diminished,
    Sus,
}

impl SimpleQuality {
    pub fn suffix(self) -> &'static str {
        match self {
            SimpleQuality::Major => "",
            SimpleQuality::Minor => "m",
            SimpleQuality::Augmented => "aug",
            SimpleQuality::Diminished => "dim",
            SimpleQuality::Sus => "sus",
        }
    }
}

/// Bucket a canonical quality.
///
/// Unrecognized quality text is bucketed by explicit prefixes only
/// (`dim`/`°`/`ø`, `aug`/`+`, `sus`, then the minor-prefix rule); anything
/// else counts as major.
pub fn simple_quality(quality: &ChordQuality) -> SimpleQuality {
    match quality {
        ChordQuality::Major
        | ChordQuality::Dominant7
        | ChordQuality::Major7
        | ChordQuality::Sixth
        | ChordQuality::Ninth
        | ChordQuality::Major9
        | ChordQuality::Eleventh
        | ChordQuality::Thirteenth => SimpleQuality::Major,
        ChordQuality::Minor
        | ChordQuality::Minor7
        | ChordQuality::MinorSixth
        | ChordQuality::Minor9 => SimpleQuality::Minor,
        ChordQuality::Augmented => SimpleQuality::Augmented,
        ChordQuality::Diminished => SimpleQuality::Diminished,
        ChordQuality::Sus2 | ChordQuality::Sus4 => SimpleQuality::Sus,
        ChordQuality::Unrecognized(text) => bucket_unrecognized(text),
    }
}

fn bucket_unrecognized(text: &str) -> SimpleQuality {
    let text = text.trim_start_matches(':');
    if text.starts_with("dim") || text.starts_with('°') || text.starts_with('ø') {
        SimpleQuality::Diminished
    } else if text.starts_with("aug") || text.starts_with('+') {
        SimpleQuality::Augmented
    } else if text.starts_with("sus") {
        SimpleQuality::Sus
    } else if has_minor_prefix(text) {
        SimpleQuality::Minor
    } else {
        SimpleQuality::Major
    }
}

/// Simplified label for `chord`. Chords without a root come back as written.
///
/// The root keeps its written letter (`Cb` stays C♭); only double
/// accidentals are respelled.
pub fn simplify(chord: &ParsedChord, style: AccidentalStyle) -> String {
    if !chord.has_root() {
        return chord.raw.clone();
    }
    let root = match chord.root_name {
        Some(name) if name.alteration.abs() <= 1 => render_note(&name, style),
        _ => spell_text(chord.root, chord.root_spelling, style),
    };
    format!("{}{}", root, simple_quality(&chord.quality).suffix())
}

/// Parse and simplify one label.
///
/// ```
/// use chord_engine::simplify::simplify_label;
/// use chord_engine::spelling::AccidentalStyle;
///
/// assert_eq!(simplify_label("Bbmaj7/D", AccidentalStyle::Unicode), "B♭");
/// assert_eq!(simplify_label("F#m7b5", AccidentalStyle::Unicode), "F♯dim");
/// assert_eq!(simplify_label("N.C.", AccidentalStyle::Unicode), "N.C.");
/// ```
pub fn simplify_label(text: &str, style: AccidentalStyle) -> String {
    simplify(&parse_chord(text), style)
}

pub fn simplify_labels<S: AsRef<str>>(labels: &[S], style: AccidentalStyle) -> Vec<String> {
    labels
        .iter()
        .map(|label| simplify_label(label.as_ref(), style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(text: &str) -> String {
        simplify_label(text, AccidentalStyle::Unicode)
    }

    #[test]
    fn test_buckets() {
        assert_eq!(simple("C"), "C");
        assert_eq!(simple("G7"), "G");
        assert_eq!(simple("Cmaj9"), "C");
        assert_eq!(simple("A13"), "A");
        assert_eq!(simple("Dm7"), "Dm");
        assert_eq!(simple("Ebm6"), "E♭m");
        assert_eq!(simple("C:min9"), "Cm");
        assert_eq!(simple("Gaug"), "Gaug");
        assert_eq!(simple("G+"), "Gaug");
        assert_eq!(simple("Bdim7"), "Bdim");
        assert_eq!(simple("Dsus2"), "Dsus");
        assert_eq!(simple("Dsus4"), "Dsus");
    }

    #[test]
    fn test_drops_inversions() {
        assert_eq!(simple("C/E"), "C");
        assert_eq!(simple("G#m/7"), "G♯m");
        assert_eq!(simple("Am/b3"), "Am");
        assert_eq!(simple("C/8"), "C");
    }

    #[test]
    fn test_unrecognized_quality_prefix_rules() {
        assert_eq!(simple("Cmaj13#11(no3)"), "C");
        assert_eq!(simple("Cm11b13"), "Cm");
        assert_eq!(simple("Cdim(add9)x"), "Cdim");
        assert_eq!(simple("Csus24"), "Csus");
        assert_eq!(simple("C+5x"), "Caug");
    }

    #[test]
    fn test_keeps_written_root_letter() {
        assert_eq!(simple("Cbmaj7"), "C♭");
        assert_eq!(simple("Fb/3"), "F♭");
        assert_eq!(simple("E#m7"), "E♯m");
        assert_eq!(simple("B#dim"), "B♯dim");
        assert_eq!(simple("C##"), "D");
        assert_eq!(simplify_label("Cb", AccidentalStyle::Ascii), "Cb");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(simple("N"), "N");
        assert_eq!(simple("N/C"), "N/C");
        assert_eq!(simple("garbage"), "garbage");
    }

    #[test]
    fn test_idempotent() {
        for text in [
            "C", "C#m7", "Dbmaj7", "Ebm9/Gb", "F#dim7", "G7sus4", "Abaug", "A:hdim7",
            "Bb13", "E#", "Cb/b7", "N.C.", "nope",
        ] {
            let once = simple(text);
            assert_eq!(simple(&once), once, "simplifying {} twice", text);
        }
    }

    #[test]
    fn test_simple_labels_ascii() {
        assert_eq!(
            simplify_labels(&["F#m7", "Bbmaj7"], AccidentalStyle::Ascii),
            vec!["F#m", "Bb"]
        );
    }
}
