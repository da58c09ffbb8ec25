use serde::{Deserialize, Serialize};

use crate::game::ScoreManager;

/// Immutable summary of a finished session, for the results screen and the
/// high-score store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    pub score: u32,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub good_count: u32,
    pub ok_count: u32,
    pub miss_count: u32,
    pub accuracy: f64,
}

impl From<&ScoreManager> for PlayResult {
    fn from(score: &ScoreManager) -> Self {
        Self {
            score: score.score,
            max_combo: score.max_combo,
            perfect_count: score.perfect_count,
            good_count: score.good_count,
            ok_count: score.ok_count,
            miss_count: score.miss_count,
            accuracy: score.accuracy(),
        }
    }
}

impl PlayResult {
    /// True when every judged note landed, regardless of quality.
    pub fn is_full_combo(&self) -> bool {
        self.miss_count == 0
    }
}
