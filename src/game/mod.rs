//! Timing-window judgment and scoring.

mod judge;
mod score;
mod session;

pub use judge::{
    GOOD_WINDOW_MS, JudgmentKind, PERFECT_WINDOW_MS, TIMING_WINDOW_MS, classify, is_expired,
};
pub use score::ScoreManager;
pub use session::{InputEvent, JudgmentEvent, JudgmentSession};
