use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Abstraction over the audio playback host.
///
/// The engine only starts, stops, and queries the transport; decoding and
/// device output live outside this crate. Every call may fail without
/// consequence for gameplay, which runs on the virtual clock regardless of
/// audio state. Implementations: platform backends (outside this crate),
/// [`MockAudio`] (testing).
pub trait AudioTransport {
    fn load(&mut self, source: &Path) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn seek(&mut self, position_ms: i64) -> Result<()>;
    /// Current playback position, in milliseconds.
    fn position_ms(&self) -> i64;
    /// True when the track ran to its end since the last play/seek.
    fn has_ended(&self) -> bool;
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}

/// Scriptable transport for tests: records calls and lets the test flag
/// end-of-track or force failures.
#[derive(Debug, Default)]
pub struct MockAudio {
    loaded: Option<PathBuf>,
    playing: bool,
    ended: bool,
    position_ms: i64,
    volume: f32,
    fail_playback: bool,
    pub play_calls: u32,
    pub stop_calls: u32,
    pub seek_calls: u32,
}

impl MockAudio {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            ..Self::default()
        }
    }

    /// Every subsequent play/stop/seek call returns an error.
    pub fn failing() -> Self {
        Self {
            fail_playback: true,
            ..Self::new()
        }
    }

    /// Simulate the track running out.
    pub fn mark_ended(&mut self) {
        self.ended = true;
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn loaded_source(&self) -> Option<&Path> {
        self.loaded.as_deref()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl AudioTransport for MockAudio {
    fn load(&mut self, source: &Path) -> Result<()> {
        self.loaded = Some(source.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.fail_playback {
            bail!("mock transport refused to play");
        }
        self.playing = true;
        self.ended = false;
        self.play_calls += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.fail_playback {
            bail!("mock transport refused to stop");
        }
        self.playing = false;
        self.stop_calls += 1;
        Ok(())
    }

    fn seek(&mut self, position_ms: i64) -> Result<()> {
        if self.fail_playback {
            bail!("mock transport refused to seek");
        }
        self.position_ms = position_ms;
        self.ended = false;
        self.seek_calls += 1;
        Ok(())
    }

    fn position_ms(&self) -> i64 {
        self.position_ms
    }

    fn has_ended(&self) -> bool {
        self.ended
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = volume.clamp(0.0, 1.0);
        Ok(())
    }
}
