use crate::chord::{Inversion, ParsedChord};
use crate::key::Key;
use crate::parser::parse_chord;
use crate::spelling::{spell, AccidentalStyle};
use crate::theory::SpellingPreference;

/// Semitones to shift concert-pitch chords so they read correctly for a
/// transposing instrument (`"Bb"` trumpet, `"Eb"` alto sax, `"F"` horn).
pub fn instrument_offset(viewed_key: &str) -> Option<i32> {
    // A Bb instrument sounds a whole step below what it reads, so its chart
    // is written a whole step UP
    match viewed_key.trim() {
        "C" => Some(0),
        "Bb" | "B♭" => Some(2),
        "Eb" | "E♭" => Some(9),
        "F" => Some(7),
        _ => None,
    }
}

/// Signed shortest distance between two key tonics, in `-5..=6`.
pub fn semitones_between(from: &Key, to: &Key) -> i32 {
    from.tonic_pitch().interval_to(to.tonic_pitch())
}

/// Shift a chord by `semitones`, spelling the result for the `target` key.
///
/// Quality and inversion degree are kept; the root (and a note-name bass) are
/// re-spelled with the target preference, not the chord's original spelling.
/// A degree inversion's bass is recomputed from the new root whenever it is
/// asked for. No-chord sentinels and root-less text come back unchanged.
pub fn transpose(chord: &ParsedChord, semitones: i32, target: SpellingPreference) -> ParsedChord {
    if !chord.has_root() {
        return chord.clone();
    }

    let new_root = chord.root.shift(semitones);
    let inversion = chord.inversion.as_ref().map(|inversion| match inversion {
        Inversion::Degree(spec) => Inversion::Degree(*spec),
        Inversion::Note(note) => {
            Inversion::Note(spell(note.pitch_class().shift(semitones), target))
        }
        Inversion::Unsupported(text) => Inversion::Unsupported(text.clone()),
    });

    let mut transposed = ParsedChord::new(
        spell(new_root, target),
        target,
        chord.quality.clone(),
        inversion,
        String::new(),
    );
    transposed.raw = transposed.symbol(AccidentalStyle::Unicode);
    transposed
}

/// Parse, transpose and render one chord label with its bass resolved.
pub fn transpose_label(
    text: &str,
    semitones: i32,
    target: SpellingPreference,
    style: AccidentalStyle,
) -> String {
    let chord = parse_chord(text);
    if !chord.has_root() {
        return text.to_string();
    }
    transpose(&chord, semitones, target).display_label(style)
}

/// [`transpose_label()`] over a whole label sequence.
pub fn transpose_labels<S: AsRef<str>>(
    labels: &[S],
    semitones: i32,
    target: SpellingPreference,
    style: AccidentalStyle,
) -> Vec<String> {
    labels
        .iter()
        .map(|label| transpose_label(label.as_ref(), semitones, target, style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inversion::resolve_bass;
    use crate::quality::ChordQuality;

    const SHARP: SpellingPreference = SpellingPreference::Sharp;
    const FLAT: SpellingPreference = SpellingPreference::Flat;

    #[test]
    fn test_transpose_root() {
        let chord = parse_chord("C");
        assert_eq!(transpose(&chord, 1, SHARP).to_string(), "C♯");
        assert_eq!(transpose(&chord, 1, FLAT).to_string(), "D♭");
        assert_eq!(transpose(&chord, -1, FLAT).to_string(), "B");
        assert_eq!(transpose(&chord, 12, FLAT).to_string(), "C");
    }

    #[test]
    fn test_target_key_overrides_original_spelling() {
        let chord = parse_chord("F#m7");
        let moved = transpose(&chord, 0, FLAT);
        assert_eq!(moved.to_string(), "G♭m7");
        assert_eq!(moved.root, chord.root);
        assert_eq!(moved.quality, ChordQuality::Minor7);
    }

    #[test]
    fn test_degree_bass_recomputed_from_new_root() {
        let chord = parse_chord("C/b7");
        let moved = transpose(&chord, 2, FLAT);
        assert_eq!(moved.to_string(), "D/♭7");
        assert_eq!(moved.display_label(AccidentalStyle::Unicode), "D/C");

        let spec = match &moved.inversion {
            Some(Inversion::Degree(spec)) => *spec,
            other => panic!("expected degree inversion, got {:?}", other),
        };
        assert_eq!(
            moved.bass(),
            resolve_bass(moved.root, FLAT, &moved.quality, &spec)
        );
    }

    #[test]
    fn test_degree_bass_spelled_for_target_key() {
        let chord = parse_chord("Cm/3");
        let style = AccidentalStyle::Unicode;
        assert_eq!(transpose(&chord, 6, FLAT).display_label(style), "G♭m/A");
        assert_eq!(transpose(&chord, 6, SHARP).display_label(style), "F♯m/A");
        assert_eq!(transpose_label("F#/b7", 0, FLAT, style), "G♭/E");
    }

    #[test]
    fn test_note_bass_moves_with_root() {
        let chord = parse_chord("C/E");
        let moved = transpose(&chord, 2, SHARP);
        assert_eq!(moved.to_string(), "D/F♯");
        let moved = transpose(&chord, 3, FLAT);
        assert_eq!(moved.to_string(), "E♭/G");
    }

    #[test]
    fn test_passthrough() {
        let no_chord = parse_chord("N.C.");
        assert_eq!(transpose(&no_chord, 5, SHARP), no_chord);
        let unknown = parse_chord("???");
        assert_eq!(transpose(&unknown, 5, SHARP), unknown);
        assert_eq!(transpose_label("N/C", 3, FLAT, AccidentalStyle::Unicode), "N/C");
    }

    #[test]
    fn test_transpose_labels() {
        let labels = ["Gm7", "C7", "Fmaj7", "N"];
        assert_eq!(
            transpose_labels(&labels, -2, FLAT, AccidentalStyle::Unicode),
            vec!["Fm7", "B♭7", "E♭maj7", "N"]
        );
        assert_eq!(
            transpose_labels(&labels, -2, FLAT, AccidentalStyle::Ascii),
            vec!["Fm7", "Bb7", "Ebmaj7", "N"]
        );
    }

    #[test]
    fn test_round_trip_pitch_classes() {
        for text in ["C", "G#m/7", "Bb/b7", "F#/b7", "Ebmaj7/G", "Dm/b3", "Asus4/5"] {
            let chord = parse_chord(text);
            for n in -12..=12 {
                for target in [SHARP, FLAT] {
                    let back = transpose(&transpose(&chord, n, target), -n, target);
                    assert_eq!(back.root, chord.root, "{} by {}", text, n);
                    assert_eq!(
                        back.bass().map(|b| b.pitch),
                        chord.bass().map(|b| b.pitch),
                        "{} by {}",
                        text,
                        n
                    );
                }
            }
        }
    }

    #[test]
    fn test_semitones_between_keys() {
        let c: Key = "C".parse().unwrap();
        let d: Key = "D".parse().unwrap();
        let bb: Key = "Bb".parse().unwrap();
        assert_eq!(semitones_between(&c, &d), 2);
        assert_eq!(semitones_between(&c, &bb), -2);
        assert_eq!(semitones_between(&d, &c), -2);
    }

    #[test]
    fn test_instrument_offset() {
        assert_eq!(instrument_offset("C"), Some(0));
        assert_eq!(instrument_offset("Bb"), Some(2));
        assert_eq!(instrument_offset("Eb"), Some(9));
        assert_eq!(instrument_offset("F"), Some(7));
        assert_eq!(instrument_offset("G"), None);
    }
}
