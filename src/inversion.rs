//! # Inversion Resolver
//!
//! Computes the bass note of a slash chord written in degree notation.
//!
//! ## Pitch
//! ```text
//! bass = (root + degree_offset + accidental) mod 12
//! ```
//! - Degree offsets: 2→2, 3→4 (3 when the chord's third is minor), 4→5, 5→7,
//!   6→9, 7→11, 9→14
//! - A sharp adds a semitone and a flat removes one, except that a flat on the
//!   3rd of a chord whose third is already minor changes nothing: `Cm/b3` is
//!   E♭, not D.
//!
//! ## Spelling
//! The bass spelling preference is:
//! - flat accidental on the inversion and a root that is not sharp → flat
//! - otherwise the root's own preference
//!
//! In a flat context the bass always comes from the flat table, so
//! enharmonically equal chords agree (`Gb/b7` and `F#/b7` both give E). In a
//! sharp context the bass letter is counted from the root letter (the 7th
//! above G♯ is an F) and keeps that letter while it needs no flats and at
//! most a double sharp. This is how `G♯m/7` becomes F𝄪 rather than G.
//! Anything else falls back to the sharp table.
//!
//! | Chord    | Bass |
//! |----------|------|
//! | `G#m/3`  | B    |
//! | `G#m/7`  | F𝄪   |
//! | `C/b7`   | B♭   |
//! | `F#/b7`  | E    |
//! | `Bb/b7`  | A♭   |

use crate::chord::{Inversion, InversionSpec, ParsedChord};
use crate::quality::ChordQuality;
use crate::spelling::{render_note, spell, AccidentalStyle};
use crate::theory::{degree_offset, Accidental, PitchClass, SpelledNote, SpellingPreference};
use serde::Serialize;

/// Most sharps written on a letter-counted bass
const MAX_ALTERATION: i8 = 2;

/// A computed bass note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedBass {
    pub pitch: PitchClass,
    pub spelling: SpellingPreference,
    pub name: SpelledNote,
}

/// Resolve the bass from a root pitch class and its spelling preference.
///
/// The root letter is taken from the speller tables, so this is the form to
/// use after transposition, where the root only exists as a pitch class plus
/// a target-key preference.
pub fn resolve_bass(
    root: PitchClass,
    root_spelling: SpellingPreference,
    quality: &ChordQuality,
    inversion: &InversionSpec,
) -> Option<ResolvedBass> {
    resolve_bass_from(spell(root, root_spelling), root_spelling, quality, inversion)
}

/// Resolve the bass from an already spelled root (`E#` stays on letter E).
pub fn resolve_bass_from(
    root_name: SpelledNote,
    root_spelling: SpellingPreference,
    quality: &ChordQuality,
    inversion: &InversionSpec,
) -> Option<ResolvedBass> {
    let minor_third = quality.has_minor_third();
    let Some(base) = degree_offset(inversion.degree, minor_third) else {
        tracing::debug!(degree = inversion.degree, "unsupported inversion degree");
        return None;
    };

    let adjustment = match inversion.accidental {
        // the third is already flattened; a written flat is redundant
        Some(Accidental::Flat) if inversion.degree == 3 && minor_third => 0,
        Some(acc) => acc.semitones(),
        None => 0,
    };

    let pitch = root_name.pitch_class().shift(base + adjustment);

    let spelling = if inversion.accidental == Some(Accidental::Flat)
        && root_spelling != SpellingPreference::Sharp
    {
        SpellingPreference::Flat
    } else {
        root_spelling
    };

    let name = match spelling {
        SpellingPreference::Flat => spell(pitch, SpellingPreference::Flat),
        SpellingPreference::Sharp => {
            let letter = root_name.letter.step(inversion.degree as usize - 1);
            let on_letter = SpelledNote::on_letter(letter, pitch);
            if (0..=MAX_ALTERATION).contains(&on_letter.alteration) {
                on_letter
            } else {
                tracing::trace!(
                    root = %root_name,
                    degree = inversion.degree,
                    "bass off the counted letter, using sharp table"
                );
                spell(pitch, SpellingPreference::Sharp)
            }
        }
    };

    Some(ResolvedBass { pitch, spelling, name })
}

/// Text to show after the slash of `chord`, or `None` without an inversion.
///
/// Degree inversions are resolved to a note name; anything that cannot be
/// resolved comes back exactly as it was written.
pub fn render_inversion(chord: &ParsedChord, style: AccidentalStyle) -> Option<String> {
    let inversion = chord.inversion.as_ref()?;
    let text = match inversion {
        Inversion::Degree(spec) => match chord.bass() {
            Some(bass) => render_note(&bass.name, style),
            None => spec.render(style),
        },
        Inversion::Note(note) => render_note(note, style),
        Inversion::Unsupported(text) => text.clone(),
    };
    Some(text)
}
