use super::judge::JudgmentKind;

/// Maximum combo multiplier bonus (i.e. 3x points at full combo streak).
const COMBO_BONUS_CAP: f64 = 2.0;
const COMBO_BONUS_STEP: f64 = 0.1;

/// Running score, combo, and judgment tallies for one session.
#[derive(Debug, Clone, Default)]
pub struct ScoreManager {
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub good_count: u32,
    pub ok_count: u32,
    pub miss_count: u32,
}

impl ScoreManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one judgment and return the points it awarded.
    ///
    /// The combo multiplier uses the streak built up before this hit, so the
    /// first hit after a reset always scores base points.
    pub fn apply(&mut self, kind: JudgmentKind) -> u32 {
        if kind.breaks_combo() {
            self.miss_count += 1;
            self.combo = 0;
            return 0;
        }
        match kind {
            JudgmentKind::Perfect => self.perfect_count += 1,
            JudgmentKind::Good => self.good_count += 1,
            JudgmentKind::Ok => self.ok_count += 1,
            JudgmentKind::Miss => unreachable!(),
        }
        let delta = scaled_points(kind.base_points(), self.combo);
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.score += delta;
        delta
    }

    pub fn judged_count(&self) -> u32 {
        self.perfect_count + self.good_count + self.ok_count + self.miss_count
    }

    /// Share of non-miss judgments, as a percentage. 100 before anything has
    /// been judged, matching the score display's starting state.
    pub fn accuracy(&self) -> f64 {
        let total = self.judged_count();
        if total == 0 {
            return 100.0;
        }
        let hits = total - self.miss_count;
        f64::from(hits) / f64::from(total) * 100.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn scaled_points(base: u32, combo: u32) -> u32 {
    let bonus = (f64::from(combo) * COMBO_BONUS_STEP).min(COMBO_BONUS_CAP);
    (f64::from(base) * (1.0 + bonus)).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_hit_scores_base_points() {
        let mut score = ScoreManager::new();
        assert_eq!(score.apply(JudgmentKind::Perfect), 100);
        assert_eq!(score.score, 100);
        assert_eq!(score.combo, 1);
    }

    #[test]
    fn combo_bonus_uses_pre_hit_streak() {
        let mut score = ScoreManager::new();
        score.apply(JudgmentKind::Perfect); // combo 0 -> 100
        let second = score.apply(JudgmentKind::Perfect); // combo 1 -> 110
        assert_eq!(second, 110);
        assert_eq!(score.score, 210);
        assert_eq!(score.max_combo, 2);
    }

    #[test]
    fn combo_bonus_caps_at_triple_points() {
        let mut score = ScoreManager::new();
        for _ in 0..25 {
            score.apply(JudgmentKind::Perfect);
        }
        // 26th hit: streak 25 caps the bonus at 2.0.
        assert_eq!(score.apply(JudgmentKind::Perfect), 300);
    }

    #[test]
    fn good_and_ok_points() {
        let mut score = ScoreManager::new();
        assert_eq!(score.apply(JudgmentKind::Good), 75);
        score.reset();
        assert_eq!(score.apply(JudgmentKind::Ok), 50);
    }

    #[test]
    fn fractional_bonus_floors() {
        let mut score = ScoreManager::new();
        score.apply(JudgmentKind::Perfect);
        // streak 1: 75 * 1.1 = 82.5 -> 82
        assert_eq!(score.apply(JudgmentKind::Good), 82);
    }

    #[test]
    fn miss_resets_combo_but_not_score() {
        let mut score = ScoreManager::new();
        score.apply(JudgmentKind::Perfect);
        score.apply(JudgmentKind::Perfect);
        assert_eq!(score.apply(JudgmentKind::Miss), 0);
        assert_eq!(score.combo, 0);
        assert_eq!(score.max_combo, 2);
        assert_eq!(score.score, 210);
        // Next hit starts from base points again.
        assert_eq!(score.apply(JudgmentKind::Perfect), 100);
    }

    #[test]
    fn accuracy_tracks_hit_share() {
        let mut score = ScoreManager::new();
        assert_eq!(score.accuracy(), 100.0);
        score.apply(JudgmentKind::Perfect);
        score.apply(JudgmentKind::Miss);
        assert!((score.accuracy() - 50.0).abs() < f64::EPSILON);
    }
}
