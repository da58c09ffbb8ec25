/// Outer timing window: a tap only counts against a note within this range,
/// and a note unhit for this long past its time expires as a miss.
pub const TIMING_WINDOW_MS: i64 = 300;
/// Perfect threshold.
pub const PERFECT_WINDOW_MS: i64 = 100;
/// Good threshold (0.7 of the outer window).
pub const GOOD_WINDOW_MS: i64 = 210;

/// Classification of one note or one whiffed tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JudgmentKind {
    Perfect,
    Good,
    Ok,
    Miss,
}

impl JudgmentKind {
    /// Base points before the combo multiplier.
    pub fn base_points(self) -> u32 {
        match self {
            Self::Perfect => 100,
            Self::Good => 75,
            Self::Ok => 50,
            Self::Miss => 0,
        }
    }

    pub fn breaks_combo(self) -> bool {
        matches!(self, Self::Miss)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Perfect => "PERFECT",
            Self::Good => "GOOD",
            Self::Ok => "OK",
            Self::Miss => "MISS",
        }
    }
}

/// Classify an absolute time difference, or `None` outside the outer window.
pub fn classify(abs_diff_ms: i64) -> Option<JudgmentKind> {
    if abs_diff_ms <= PERFECT_WINDOW_MS {
        Some(JudgmentKind::Perfect)
    } else if abs_diff_ms <= GOOD_WINDOW_MS {
        Some(JudgmentKind::Good)
    } else if abs_diff_ms <= TIMING_WINDOW_MS {
        Some(JudgmentKind::Ok)
    } else {
        None
    }
}

/// True once the clock has moved past a note's hittable range.
pub fn is_expired(note_time_ms: i64, clock_ms: i64) -> bool {
    clock_ms > note_time_ms + TIMING_WINDOW_MS
}
