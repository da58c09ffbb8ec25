use serde::{Deserialize, Serialize};

use super::note::Note;

/// Coarse difficulty bucket shown on the song wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl DifficultyTier {
    /// Map an OverallDifficulty value to a tier.
    pub fn from_overall_difficulty(od: f64) -> Self {
        if od < 3.0 {
            Self::Easy
        } else if od < 6.0 {
            Self::Medium
        } else {
            Self::Hard
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// A parsed chart: metadata plus the note sequence.
///
/// `notes` is sorted by `time_ms` non-decreasing; duplicate times are allowed
/// (simultaneous notes on different lanes). A beatmap is built once and never
/// mutated afterwards. Transforms such as the hard-mode densifier return a
/// fresh beatmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beatmap {
    pub title: String,
    pub artist: String,
    /// Audio source name from the chart, passed through unresolved.
    pub audio_filename: Option<String>,
    pub bpm: Option<u32>,
    pub difficulty: DifficultyTier,
    /// Lead-in offset from the chart, applied at clock start.
    pub timing_offset_ms: i64,
    notes: Vec<Note>,
}

impl Beatmap {
    /// Build a beatmap from possibly unsorted notes. Sorting is stable so
    /// simultaneous notes keep their emission order.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        difficulty: DifficultyTier,
        mut notes: Vec<Note>,
    ) -> Self {
        notes.sort_by_key(|n| n.time_ms);
        Self {
            title: title.into(),
            artist: artist.into(),
            audio_filename: None,
            bpm: None,
            difficulty,
            timing_offset_ms: 0,
            notes,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn first_note_time_ms(&self) -> Option<i64> {
        self.notes.first().map(|n| n.time_ms)
    }

    /// Return a copy with every note time moved forward by `delta_ms`.
    pub fn shifted(&self, delta_ms: i64) -> Self {
        let notes = self
            .notes
            .iter()
            .map(|n| Note::new(n.time_ms + delta_ms, n.lane))
            .collect();
        Self {
            notes,
            ..self.clone()
        }
    }

    /// Replace the note sequence, re-sorting to keep the ordering invariant.
    pub fn with_notes(&self, mut notes: Vec<Note>) -> Self {
        notes.sort_by_key(|n| n.time_ms);
        Self {
            notes,
            ..self.clone()
        }
    }
}
