use serde::{Deserialize, Serialize};

/// Input channel a note belongs to and a tap targets.
///
/// `Center` is a hit on the drum face (historically "don"), `Rim` a hit on
/// the drum edge ("ka"). This enum is the only lane representation in the
/// crate; the parser collapses raw position/hit-sound codes into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Center,
    Rim,
}

/// A single judgeable note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Offset from song start in milliseconds. May be negative until the
    /// session controller applies the lead-in shift.
    pub time_ms: i64,
    pub lane: Lane,
}

impl Note {
    pub fn new(time_ms: i64, lane: Lane) -> Self {
        Self { time_ms, lane }
    }

    pub fn center(time_ms: i64) -> Self {
        Self::new(time_ms, Lane::Center)
    }

    pub fn rim(time_ms: i64) -> Self {
        Self::new(time_ms, Lane::Rim)
    }
}
