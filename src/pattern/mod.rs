//! Procedural difficulty transforms.
//!
//! Transforms never mutate their input; each returns a fresh beatmap. The rng
//! is injected so callers that need reproducibility (tests, replays) can seed
//! it.

use rand::Rng;

use crate::model::{Beatmap, Lane, Note};

/// Hard-mode densifier: inserts one note at the midpoint of every adjacent
/// pair in the original sequence, with a coin-flip lane per insertion.
///
/// A beatmap with `k` notes comes back with exactly `2k - 1`; every original
/// note keeps its time and lane.
pub fn densify(beatmap: &Beatmap, rng: &mut impl Rng) -> Beatmap {
    let original = beatmap.notes();
    let mut notes: Vec<Note> = original.to_vec();
    for pair in original.windows(2) {
        let mid = (pair[0].time_ms + pair[1].time_ms) / 2;
        let lane = if rng.random_bool(0.5) {
            Lane::Center
        } else {
            Lane::Rim
        };
        notes.push(Note::new(mid, lane));
    }
    beatmap.with_notes(notes)
}
