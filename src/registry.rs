//! Beatmap registry with an explicit lifecycle.
//!
//! Replaces ambient caches: whoever composes the session controller owns a
//! registry, initializes it from a chart directory, and disposes of it when
//! the screen goes away.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::chart::ChartLoader;
use crate::model::{Beatmap, DifficultyTier, Note};

/// Song-wheel projection of one registered beatmap.
#[derive(Debug, Clone)]
pub struct SongEntry {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub difficulty: DifficultyTier,
    pub bpm: Option<u32>,
    pub note_count: usize,
}

#[derive(Debug, Default)]
pub struct BeatmapRegistry {
    entries: HashMap<String, Beatmap>,
}

impl BeatmapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a directory for `.osu` charts and register every one that loads.
    /// Individual chart failures are logged and skipped; only an unreadable
    /// directory is an error. Returns how many charts were registered.
    pub fn initialize<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize> {
        let dir = dir.as_ref();
        let mut loaded = 0;
        let iter = fs::read_dir(dir)
            .with_context(|| format!("failed to scan chart directory {}", dir.display()))?;
        for entry in iter {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "osu") {
                continue;
            }
            match ChartLoader::load_with_id(&path) {
                Ok((beatmap, id)) => {
                    self.insert(id, beatmap);
                    loaded += 1;
                }
                Err(e) => warn!(path = %path.display(), "skipping unreadable chart: {e}"),
            }
        }
        info!(count = loaded, dir = %dir.display(), "registry initialized");
        Ok(loaded)
    }

    /// Register a beatmap under an id, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, beatmap: Beatmap) -> Option<Beatmap> {
        self.entries.insert(id.into(), beatmap)
    }

    pub fn get(&self, id: &str) -> Option<&Beatmap> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Song-wheel entries, sorted by title for a stable display order.
    pub fn song_entries(&self) -> Vec<SongEntry> {
        let mut entries: Vec<SongEntry> = self
            .entries
            .iter()
            .map(|(id, map)| SongEntry {
                id: id.clone(),
                title: map.title.clone(),
                artist: map.artist.clone(),
                difficulty: map.difficulty,
                bpm: map.bpm,
                note_count: map.note_count(),
            })
            .collect();
        entries.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        entries
    }

    /// Drop every registered beatmap.
    pub fn dispose(&mut self) {
        self.entries.clear();
    }
}

/// Built-in practice chart, used when a selected beatmap has no notes.
pub fn default_beatmap() -> Beatmap {
    let notes = vec![
        Note::center(1000),
        Note::rim(2000),
        Note::center(3000),
        Note::center(3500),
        Note::rim(4000),
        Note::center(4500),
        Note::rim(5000),
        Note::center(5500),
        Note::center(6000),
        Note::rim(6500),
        Note::center(7000),
    ];
    Beatmap::new("Warm-Up", "Unknown Artist", DifficultyTier::Easy, notes)
}
