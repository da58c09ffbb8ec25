use crate::model::{Lane, Note};

use super::judge::{self, JudgmentKind, TIMING_WINDOW_MS};
use super::score::ScoreManager;

/// One discrete tap from the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub lane: Lane,
    /// Virtual clock time at which the tap landed.
    pub at_clock_ms: i64,
}

/// Outcome of judging one tap or expiring one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgmentEvent {
    pub kind: JudgmentKind,
    pub score_delta: u32,
    /// The note this judgment consumed; `None` for a whiff with no candidate.
    pub note: Option<Note>,
}

/// Mutable state of one play-through: the shrinking pending-note list plus
/// score and combo.
///
/// Every note is judged at most once. Removal from `pending` is the single
/// linearization point: a note leaves the list either through [`judge`] or
/// through [`expire`], never both.
///
/// [`judge`]: JudgmentSession::judge
/// [`expire`]: JudgmentSession::expire
#[derive(Debug, Clone)]
pub struct JudgmentSession {
    pending: Vec<Note>,
    score: ScoreManager,
    last_judgment: Option<JudgmentEvent>,
    source_note_count: usize,
}

impl JudgmentSession {
    /// Start a session over an already lead-in-adjusted note sequence.
    pub fn new(mut notes: Vec<Note>) -> Self {
        notes.sort_by_key(|n| n.time_ms);
        let source_note_count = notes.len();
        Self {
            pending: notes,
            score: ScoreManager::new(),
            last_judgment: None,
            source_note_count,
        }
    }

    /// Judge one tap against the pending notes.
    ///
    /// Returns `None` for an invalid event (clock before session start),
    /// which is a no-op. Otherwise returns the judgment: the nearest
    /// same-lane note within the timing window is consumed, or the tap is a
    /// whiff miss that resets combo without consuming anything.
    pub fn judge(&mut self, event: InputEvent) -> Option<JudgmentEvent> {
        if event.at_clock_ms < 0 {
            return None;
        }

        // Nearest matching note wins, not the first in list order; on an
        // exact tie the earlier note is kept.
        let mut best: Option<(usize, i64)> = None;
        for (idx, note) in self.pending.iter().enumerate() {
            if note.lane != event.lane {
                continue;
            }
            let diff = (note.time_ms - event.at_clock_ms).abs();
            if diff > TIMING_WINDOW_MS {
                continue;
            }
            if best.is_none_or(|(_, best_diff)| diff < best_diff) {
                best = Some((idx, diff));
            }
        }

        let judgment = match best {
            Some((idx, diff)) => {
                let note = self.pending.remove(idx);
                let kind = judge::classify(diff).expect("candidate within window");
                let score_delta = self.score.apply(kind);
                JudgmentEvent {
                    kind,
                    score_delta,
                    note: Some(note),
                }
            }
            None => {
                self.score.apply(JudgmentKind::Miss);
                JudgmentEvent {
                    kind: JudgmentKind::Miss,
                    score_delta: 0,
                    note: None,
                }
            }
        };
        self.last_judgment = Some(judgment);
        Some(judgment)
    }

    /// Expire every pending note the clock has moved past, emitting a miss
    /// for each. Combo resets per expired note.
    pub fn expire(&mut self, clock_ms: i64) -> Vec<JudgmentEvent> {
        // `pending` stays sorted, so expired notes form a prefix.
        let expired = self
            .pending
            .iter()
            .take_while(|n| judge::is_expired(n.time_ms, clock_ms))
            .count();
        let mut events = Vec::with_capacity(expired);
        for note in self.pending.drain(..expired) {
            self.score.apply(JudgmentKind::Miss);
            let judgment = JudgmentEvent {
                kind: JudgmentKind::Miss,
                score_delta: 0,
                note: Some(note),
            };
            self.last_judgment = Some(judgment);
            events.push(judgment);
        }
        events
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// True when a non-empty session has consumed every note.
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty() && self.source_note_count > 0
    }

    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    pub fn last_judgment(&self) -> Option<&JudgmentEvent> {
        self.last_judgment.as_ref()
    }
}
