//! # Beat Alignment
//!
//! Maps chord-change events from the detection backend onto the beat grid, so
//! the display can show one chord label per beat.
//!
//! ## Algorithm
//! A single cursor walks the beats while the chord events are visited in
//! order:
//!
//! ```text
//! for chord in chords:
//!     while cursor < last_beat and
//!           |beats[cursor+1] - chord.start| < |beats[cursor] - chord.start|:
//!         cursor += 1
//!     assigned[cursor] = chord.label
//! ```
//!
//! The cursor never moves backward, so the sweep is O(chords + beats). Each
//! chord lands on its nearest beat (a later chord on the same beat wins), and
//! unassigned beats inherit the previous label. Beats before the first
//! assignment, and beats strictly earlier than the first chord's start, show
//! the no-chord label.
//!
//! ## Example
//! ```text
//! chords: 0.5 Gm7, 1.0 F
//! beats:  0.0  0.5   1.0  1.5
//! labels: N/C  Gm7   F    F
//! ```

use serde::{Deserialize, Serialize};

/// Label used for beats without a chord
pub const NO_CHORD_LABEL: &str = "N/C";

/// One detected beat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeatEvent {
    pub index: usize,
    pub time: f64,
}

impl BeatEvent {
    /// Index a raw list of beat timestamps (seconds).
    pub fn from_times(times: &[f64]) -> Vec<BeatEvent> {
        times
            .iter()
            .enumerate()
            .map(|(index, &time)| BeatEvent { index, time })
            .collect()
    }
}

/// One detected chord change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordEvent {
    #[serde(alias = "start")]
    pub start_time: f64,
    #[serde(alias = "end", default)]
    pub end_time: f64,
    #[serde(alias = "chord")]
    pub label: String,
}

impl ChordEvent {
    pub fn new(start_time: f64, end_time: f64, label: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            label: label.into(),
        }
    }
}

/// One chord label per beat
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct AlignedSequence {
    labels: Vec<String>,
}

impl AlignedSequence {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, beat: usize) -> Option<&str> {
        self.labels.get(beat).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }

    /// Beats where the label differs from the previous beat, as
    /// `(beat_index, label)`. Beat 0 is always included.
    pub fn changes(&self) -> Vec<(usize, &str)> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(i, label)| *i == 0 || self.labels[i - 1] != **label)
            .map(|(i, label)| (i, label.as_str()))
            .collect()
    }
}

/// Cursor result: the chord index assigned to each beat, plus how many times
/// the cursor advanced.
struct Sweep {
    assigned: Vec<Option<usize>>,
    steps: usize,
}

fn sweep(chords: &[ChordEvent], beats: &[BeatEvent]) -> Sweep {
    let mut assigned = vec![None; beats.len()];
    let mut steps = 0;
    if beats.is_empty() {
        return Sweep { assigned, steps };
    }

    let mut cursor = 0;
    for (chord_idx, chord) in chords.iter().enumerate() {
        let start = chord.start_time;
        while cursor + 1 < beats.len()
            && (beats[cursor + 1].time - start).abs() < (beats[cursor].time - start).abs()
        {
            cursor += 1;
            steps += 1;
        }
        assigned[cursor] = Some(chord_idx);
    }

    Sweep { assigned, steps }
}

/// Align chords to beats using [`NO_CHORD_LABEL`] for empty beats.
///
/// # Examples
/// ```
/// use chord_engine::align::{align_chords_to_beats, BeatEvent, ChordEvent};
///
/// let chords = vec![ChordEvent::new(0.5, 1.0, "Gm7"), ChordEvent::new(1.0, 2.0, "F")];
/// let beats = BeatEvent::from_times(&[0.0, 0.5, 1.0, 1.5]);
///
/// let aligned = align_chords_to_beats(&chords, &beats);
/// assert_eq!(aligned.labels(), ["N/C", "Gm7", "F", "F"]);
/// ```
pub fn align_chords_to_beats(chords: &[ChordEvent], beats: &[BeatEvent]) -> AlignedSequence {
    align_with_label(chords, beats, NO_CHORD_LABEL)
}

/// Align chords to beats with a custom no-chord label.
pub fn align_with_label(
    chords: &[ChordEvent],
    beats: &[BeatEvent],
    no_chord_label: &str,
) -> AlignedSequence {
    let Sweep { assigned, steps } = sweep(chords, beats);

    let mut labels = Vec::with_capacity(beats.len());
    let mut current = no_chord_label;
    for slot in &assigned {
        if let Some(chord_idx) = slot {
            current = chords[*chord_idx].label.as_str();
        }
        labels.push(current.to_string());
    }

    if let Some(first) = chords.first() {
        for (label, beat) in labels.iter_mut().zip(beats) {
            if beat.time >= first.start_time {
                break;
            }
            *label = no_chord_label.to_string();
        }
    }

    tracing::debug!(
        chords = chords.len(),
        beats = beats.len(),
        cursor_steps = steps,
        "aligned chords to beats"
    );

    AlignedSequence { labels }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chords(events: &[(f64, &str)]) -> Vec<ChordEvent> {
        events
            .iter()
            .enumerate()
            .map(|(i, (start, label))| {
                let end = events.get(i + 1).map_or(start + 1.0, |next| next.0);
                ChordEvent::new(*start, end, *label)
            })
            .collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let chords = chords(&[(0.5, "Gm7"), (1.0, "F")]);
        let beats = BeatEvent::from_times(&[0.0, 0.5, 1.0, 1.5]);
        let aligned = align_chords_to_beats(&chords, &beats);
        assert_eq!(aligned.labels(), ["N/C", "Gm7", "F", "F"]);
    }

    #[test]
    fn test_chord_at_zero_labels_first_beat() {
        let chords = chords(&[(0.0, "C"), (2.0, "G")]);
        let beats = BeatEvent::from_times(&[0.0, 1.0, 2.0, 3.0]);
        let aligned = align_chords_to_beats(&chords, &beats);
        assert_eq!(aligned.labels(), ["C", "C", "G", "G"]);
    }

    #[test]
    fn test_snaps_to_nearest_beat() {
        let chords = chords(&[(0.9, "C"), (2.2, "G")]);
        let beats = BeatEvent::from_times(&[0.0, 1.0, 2.0, 3.0]);
        let aligned = align_chords_to_beats(&chords, &beats);
        assert_eq!(aligned.labels(), ["N/C", "C", "G", "G"]);
    }

    #[test]
    fn test_prefix_before_first_chord_is_no_chord() {
        // nearest beat to 0.1 is 0.0, but the chord has not started yet there
        let chords = chords(&[(0.1, "C"), (1.0, "G")]);
        let beats = BeatEvent::from_times(&[0.0, 1.0, 2.0]);
        let aligned = align_chords_to_beats(&chords, &beats);
        assert_eq!(aligned.labels(), ["N/C", "G", "G"]);
    }

    #[test]
    fn test_later_chord_on_same_beat_wins() {
        let chords = chords(&[(0.9, "C"), (1.1, "Dm"), (3.0, "G")]);
        let beats = BeatEvent::from_times(&[0.0, 1.0, 2.0, 3.0]);
        let aligned = align_chords_to_beats(&chords, &beats);
        assert_eq!(aligned.labels(), ["N/C", "Dm", "Dm", "G"]);
    }

    #[test]
    fn test_chords_after_last_beat_land_on_last_beat() {
        let chords = chords(&[(0.0, "C"), (10.0, "G")]);
        let beats = BeatEvent::from_times(&[0.0, 1.0]);
        let aligned = align_chords_to_beats(&chords, &beats);
        assert_eq!(aligned.labels(), ["C", "G"]);
    }

    #[test]
    fn test_empty_inputs() {
        let beats = BeatEvent::from_times(&[0.0, 0.5, 1.0]);
        let aligned = align_chords_to_beats(&[], &beats);
        assert_eq!(aligned.labels(), ["N/C", "N/C", "N/C"]);

        let chords = chords(&[(0.0, "C")]);
        assert!(align_chords_to_beats(&chords, &[]).is_empty());
        assert!(align_chords_to_beats(&[], &[]).is_empty());
    }

    #[test]
    fn test_custom_label() {
        let chords = chords(&[(1.0, "A")]);
        let beats = BeatEvent::from_times(&[0.0, 1.0]);
        let aligned = align_with_label(&chords, &beats, "N");
        assert_eq!(aligned.labels(), ["N", "A"]);
    }

    #[test]
    fn test_changes() {
        let chords = chords(&[(0.0, "C"), (2.0, "G"), (3.0, "G")]);
        let beats = BeatEvent::from_times(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let aligned = align_chords_to_beats(&chords, &beats);
        assert_eq!(aligned.changes(), vec![(0, "C"), (2, "G")]);
        assert_eq!(aligned.get(4), Some("G"));
        assert_eq!(aligned.get(5), None);
    }

    #[test]
    fn test_nan_times_do_not_panic() {
        let chords = vec![ChordEvent::new(f64::NAN, 1.0, "C")];
        let beats = BeatEvent::from_times(&[0.0, 1.0]);
        let aligned = align_chords_to_beats(&chords, &beats);
        assert_eq!(aligned.len(), 2);
    }

    #[test]
    fn test_sweep_is_linear_on_equidistant_input() {
        // every chord sits exactly halfway between two beats
        let beats: Vec<BeatEvent> = BeatEvent::from_times(
            &(0..10_000).map(|i| i as f64).collect::<Vec<_>>(),
        );
        let chords: Vec<ChordEvent> = (0..1_000)
            .map(|i| {
                let start = i as f64 * 10.0 + 0.5;
                ChordEvent::new(start, start + 10.0, format!("C{}", i))
            })
            .collect();

        let result = sweep(&chords, &beats);
        assert!(result.steps < beats.len());

        let aligned = align_chords_to_beats(&chords, &beats);
        assert_eq!(aligned.len(), beats.len());
        // ties keep the earlier beat
        assert_eq!(aligned.get(0), Some("N/C"));
        assert_eq!(aligned.get(1), Some("C0"));
        assert_eq!(aligned.get(10), Some("C1"));
        assert_eq!(aligned.get(9_999), Some("C999"));
    }

    #[test]
    fn test_chord_event_json_aliases() {
        let json = r#"[
            {"startTime": 0.0, "endTime": 1.0, "label": "C"},
            {"start": 1.0, "end": 2.0, "chord": "G"},
            {"start": 2.0, "chord": "Am"}
        ]"#;
        let events: Vec<ChordEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0], ChordEvent::new(0.0, 1.0, "C"));
        assert_eq!(events[1], ChordEvent::new(1.0, 2.0, "G"));
        assert_eq!(events[2].end_time, 0.0);
    }
}
