//! Chord symbol parsing
//!
//! Splits raw chord text into root, quality and inversion, then classifies
//! each part. The parser is total: every input produces a [`ParsedChord`].
//!
//! # Accepted Forms
//! - Lead-sheet notation: `C`, `F#m7`, `Bbmaj7/D`, `G#m/b3`
//! - Colon (Harte) notation from the detection backend: `C:min`, `A:7/b7`
//! - Unicode accidentals: `F♯m`, `B♭/♭7`
//! - No-chord sentinels: `N`, `N.C.`, `N/C`, `NC`, empty text

use crate::chord::{Inversion, InversionSpec, ParsedChord};
use crate::quality::normalize_quality;
use crate::theory::{Accidental, Letter, SpelledNote};

/// Texts meaning "no chord is sounding"
pub const NO_CHORD_SYMBOLS: [&str; 4] = ["N", "N.C.", "N/C", "NC"];

/// Raw text split into its parts, before any classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordTokens<'a> {
    pub root: &'a str,
    pub quality: &'a str,
    pub inversion: Option<&'a str>,
    pub raw: &'a str,
}

pub fn is_no_chord(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || NO_CHORD_SYMBOLS.contains(&trimmed)
}

/// Split chord text into `(root, quality, inversion, raw)`.
///
/// Returns `None` when the text does not start with a root (`A`-`G` plus at
/// most one accidental).
pub fn tokenize(text: &str) -> Option<ChordTokens<'_>> {
    let raw = text.trim();
    let mut chars = raw.char_indices();

    let (_, first) = chars.next()?;
    Letter::from_char(first)?;

    let mut root_end = first.len_utf8();
    if let Some((idx, c)) = chars.next() {
        if Accidental::from_char(c).is_some() {
            root_end = idx + c.len_utf8();
        }
    }

    let remainder = &raw[root_end..];
    let (quality, inversion) = split_remainder(remainder);

    Some(ChordTokens {
        root: &raw[..root_end],
        quality,
        inversion,
        raw,
    })
}

/// Separate quality text from inversion text.
///
/// Only a single `/` marks an inversion; text with several slashes is left
/// whole for the quality normalizer to judge.
fn split_remainder(remainder: &str) -> (&str, Option<&str>) {
    if remainder.matches('/').count() == 1 {
        if let Some((before, after)) = remainder.split_once('/') {
            let quality = match before.split_once(':') {
                Some((_, quality)) => quality,
                None => before,
            };
            return (quality, Some(after));
        }
    }
    (remainder.strip_prefix(':').unwrap_or(remainder), None)
}

/// Parse a note name: letter plus up to two identical accidentals.
///
/// Accepts `##`/`bb` as well as the `𝄪`/`𝄫` glyphs.
pub fn parse_note(text: &str) -> Option<SpelledNote> {
    let mut chars = text.trim().chars();
    let letter = Letter::from_char(chars.next()?)?;

    let mut alteration: i8 = 0;
    let mut last: Option<i8> = None;
    for c in chars {
        let step = match c {
            '𝄪' => 2,
            '𝄫' => -2,
            other => Accidental::from_char(other)?.semitones() as i8,
        };
        if last.map_or(false, |prev| prev.signum() != step.signum()) {
            return None;
        }
        alteration += step;
        last = Some(step);
    }

    (alteration.abs() <= 2).then_some(SpelledNote::new(letter, alteration))
}

/// Classify the text after a slash.
///
/// A note name becomes [`Inversion::Note`]; an optional accidental plus a
/// supported degree becomes [`Inversion::Degree`]. Everything else, including
/// numbers that fail to parse, is kept verbatim.
pub fn parse_inversion(text: &str) -> Inversion {
    let trimmed = text.trim();

    if let Some(note) = parse_note(trimmed) {
        return Inversion::Note(note);
    }

    let mut chars = trimmed.chars();
    let (accidental, digits) = match chars.next().and_then(Accidental::from_char) {
        Some(acc) => (Some(acc), chars.as_str()),
        None => (None, trimmed),
    };

    let spec = Some(digits)
        .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|d| d.parse::<u8>().ok())
        .and_then(|degree| InversionSpec::new(degree, accidental));

    match spec {
        Some(spec) => Inversion::Degree(spec),
        None => {
            tracing::debug!(inversion = text, "unsupported inversion kept verbatim");
            Inversion::Unsupported(text.to_string())
        }
    }
}

/// Parse chord text into a [`ParsedChord`]. Never fails.
///
/// # Examples
/// ```
/// use chord_engine::parser::parse_chord;
/// use chord_engine::quality::ChordQuality;
///
/// let chord = parse_chord("C:min7/b7");
/// assert_eq!(chord.root.value(), 0);
/// assert_eq!(chord.quality, ChordQuality::Minor7);
/// assert_eq!(chord.to_string(), "Cm7/♭7");
///
/// assert!(parse_chord("N.C.").is_no_chord);
/// assert_eq!(parse_chord("xyz").to_string(), "xyz");
/// ```
pub fn parse_chord(text: &str) -> ParsedChord {
    if is_no_chord(text) {
        return ParsedChord::no_chord(text);
    }

    let Some(tokens) = tokenize(text) else {
        tracing::debug!(chord = text, "no root found, passing through");
        return ParsedChord::unrecognized(text);
    };

    let Some(root_name) = parse_note(tokens.root) else {
        return ParsedChord::unrecognized(text);
    };

    ParsedChord::new(
        root_name,
        root_name.spelling(),
        normalize_quality(tokens.quality),
        tokens.inversion.map(parse_inversion),
        text,
    )
}
