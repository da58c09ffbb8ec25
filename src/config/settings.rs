use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Whether selected charts are played as authored or routed through the
/// hard-mode densifier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayDifficulty {
    #[default]
    Normal,
    Hard,
}

/// User settings for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    pub difficulty: PlayDifficulty,
    /// Playback volume (0.0..=1.0), forwarded to the audio transport.
    pub volume: f32,
    /// Scroll speed multiplier for the note renderer.
    pub note_speed: f32,
    /// Input latency compensation applied by the input surface.
    pub input_offset_ms: i64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: PlayDifficulty::Normal,
            volume: 0.8,
            note_speed: 1.0,
            input_offset_ms: 0,
        }
    }
}

impl GameSettings {
    /// Load settings from disk, falling back to defaults on any failure.
    pub fn load() -> Self {
        settings_path()
            .and_then(|path| Self::read(&path))
            .unwrap_or_default()
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<()> {
        let path = settings_path()?;
        self.write(&path)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

fn settings_path() -> Result<PathBuf> {
    match ProjectDirs::from("com", "taiko", "taiko") {
        Some(dirs) => Ok(dirs.config_dir().join("settings.json")),
        None => Ok(PathBuf::from(".taiko-settings.json")),
    }
}
