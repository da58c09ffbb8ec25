//! User-facing configuration.

mod settings;

pub use settings::{GameSettings, PlayDifficulty};
