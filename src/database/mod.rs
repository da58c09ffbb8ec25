//! High-score persistence.

mod score_db;

pub use score_db::{HighScoreStore, MemoryScoreStore, ScoreDatabase};
