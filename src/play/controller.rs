use tracing::{debug, info, warn};

use crate::game::{InputEvent, JudgmentEvent, JudgmentSession, ScoreManager};
use crate::model::{Beatmap, Lane};
use crate::registry;
use crate::traits::{AudioTransport, TimeProvider};

use super::result::PlayResult;

pub const COUNTDOWN_STEPS: u32 = 3;
pub const COUNTDOWN_STEP_MS: i64 = 1_000;
/// No note may be judgeable before the player has had time to react.
pub const MIN_START_TIME_MS: i64 = 3_000;
/// Trailing feedback gets this long to settle before results surface.
pub const SETTLE_DELAY_MS: i64 = 1_000;
/// Front-loaded charts still run at least this long.
pub const MIN_SESSION_MS: i64 = 5_000;
/// Bounded cadence for the audio stall/end poll.
const AUDIO_POLL_INTERVAL_MS: i64 = 250;

/// Session lifecycle, surfaced to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayPhase {
    NotStarted,
    Counting,
    Active,
    Finished,
}

/// Total shift applied to note times at clock start: the chart's own lead-in
/// offset, plus whatever more it takes to push the earliest note past
/// [`MIN_START_TIME_MS`].
pub fn lead_in_delta(beatmap: &Beatmap) -> i64 {
    let offset = beatmap.timing_offset_ms;
    let extra = beatmap
        .first_note_time_ms()
        .map(|first| (MIN_START_TIME_MS - (first + offset)).max(0))
        .unwrap_or(0);
    offset + extra
}

/// Owns one play-through: countdown, virtual clock, judgment session, and
/// the audio transport binding.
///
/// Everything is driven from [`tick`] (~60 Hz) and the discrete input calls;
/// both take `&mut self`, so all session mutation is serialized on one
/// logical timeline. No transport call is awaited in the judgment path.
///
/// [`tick`]: PlayController::tick
pub struct PlayController<A: AudioTransport, T: TimeProvider> {
    audio: A,
    time: T,
    beatmap: Beatmap,
    session: Option<JudgmentSession>,
    phase: PlayPhase,
    countdown_start_ms: i64,
    clock_start_epoch_ms: i64,
    exhausted_at_clock_ms: Option<i64>,
    next_audio_poll_ms: i64,
    abandoned: bool,
    result: Option<PlayResult>,
}

impl<A: AudioTransport, T: TimeProvider> PlayController<A, T> {
    /// Set up a controller for a beatmap. A chart with no notes is replaced
    /// by the built-in default so there is always something to judge.
    pub fn new(beatmap: Beatmap, audio: A, time: T) -> Self {
        let beatmap = if beatmap.is_empty() {
            warn!(title = %beatmap.title, "beatmap has no notes, using default chart");
            registry::default_beatmap()
        } else {
            beatmap
        };
        Self {
            audio,
            time,
            beatmap,
            session: None,
            phase: PlayPhase::NotStarted,
            countdown_start_ms: 0,
            clock_start_epoch_ms: 0,
            exhausted_at_clock_ms: None,
            next_audio_poll_ms: 0,
            abandoned: false,
            result: None,
        }
    }

    /// Begin the 3-2-1 countdown. Input is not judged until it completes.
    pub fn start(&mut self) {
        if self.phase != PlayPhase::NotStarted {
            return;
        }
        self.countdown_start_ms = self.time.now_ms();
        self.phase = PlayPhase::Counting;
        info!(title = %self.beatmap.title, notes = self.beatmap.note_count(), "session countdown started");
    }

    /// Advance the session. Returns the misses produced by note expiry on
    /// this tick.
    pub fn tick(&mut self) -> Vec<JudgmentEvent> {
        if self.abandoned || matches!(self.phase, PlayPhase::NotStarted | PlayPhase::Finished) {
            return Vec::new();
        }
        let now = self.time.now_ms();
        match self.phase {
            PlayPhase::Counting => {
                if now - self.countdown_start_ms >= COUNTDOWN_STEPS as i64 * COUNTDOWN_STEP_MS {
                    self.begin_active(now);
                }
                Vec::new()
            }
            PlayPhase::Active => {
                let clock = now - self.clock_start_epoch_ms;
                let missed = self
                    .session
                    .as_mut()
                    .map(|s| s.expire(clock))
                    .unwrap_or_default();
                self.supervise_audio(clock);
                if self.session.as_ref().is_some_and(|s| s.is_exhausted()) {
                    let exhausted_at = *self.exhausted_at_clock_ms.get_or_insert(clock);
                    if clock - exhausted_at >= SETTLE_DELAY_MS && clock >= MIN_SESSION_MS {
                        self.finish();
                    }
                }
                missed
            }
            PlayPhase::NotStarted | PlayPhase::Finished => Vec::new(),
        }
    }

    /// Judge one timestamped input event. Ignored outside the active phase.
    pub fn input(&mut self, event: InputEvent) -> Option<JudgmentEvent> {
        if self.phase != PlayPhase::Active {
            return None;
        }
        self.session.as_mut()?.judge(event)
    }

    /// Judge a tap stamped with the current clock.
    pub fn tap(&mut self, lane: Lane) -> Option<JudgmentEvent> {
        let at_clock_ms = self.clock_ms();
        self.input(InputEvent { lane, at_clock_ms })
    }

    /// Stop everything and discard the session. Results are not surfaced for
    /// an abandoned session.
    pub fn abandon(&mut self) {
        if self.abandoned || self.phase == PlayPhase::Finished {
            return;
        }
        self.abandoned = true;
        self.phase = PlayPhase::Finished;
        self.session = None;
        if let Err(e) = self.audio.stop() {
            warn!("audio stop on abandon failed: {e:#}");
        }
        info!("session abandoned");
    }

    /// Virtual song clock; 0 until the countdown has completed.
    pub fn clock_ms(&self) -> i64 {
        match self.phase {
            PlayPhase::Active | PlayPhase::Finished if !self.abandoned => {
                self.time.now_ms() - self.clock_start_epoch_ms
            }
            _ => 0,
        }
    }

    /// Remaining countdown step (3, 2, 1) during the counting phase.
    pub fn countdown_value(&self) -> Option<u32> {
        if self.phase != PlayPhase::Counting {
            return None;
        }
        let elapsed = self.time.now_ms() - self.countdown_start_ms;
        let step = (elapsed / COUNTDOWN_STEP_MS) as u32;
        Some(COUNTDOWN_STEPS.saturating_sub(step).max(1))
    }

    pub fn phase(&self) -> PlayPhase {
        self.phase
    }

    pub fn score(&self) -> Option<&ScoreManager> {
        self.session.as_ref().map(|s| s.score())
    }

    pub fn pending_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.pending_count())
    }

    /// Final summary; present only once a non-abandoned session finished.
    pub fn result(&self) -> Option<&PlayResult> {
        self.result.as_ref()
    }

    pub fn beatmap(&self) -> &Beatmap {
        &self.beatmap
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    fn begin_active(&mut self, now_ms: i64) {
        let delta = lead_in_delta(&self.beatmap);
        let notes = self.beatmap.shifted(delta).notes().to_vec();
        self.session = Some(JudgmentSession::new(notes));
        self.clock_start_epoch_ms = now_ms;
        self.next_audio_poll_ms = AUDIO_POLL_INTERVAL_MS;
        self.phase = PlayPhase::Active;
        if let Err(e) = self.audio.play() {
            warn!("audio transport failed to start, continuing without audio: {e:#}");
        }
        debug!(lead_in_ms = delta, "clock started");
    }

    fn supervise_audio(&mut self, clock_ms: i64) {
        if clock_ms < self.next_audio_poll_ms {
            return;
        }
        self.next_audio_poll_ms = clock_ms + AUDIO_POLL_INTERVAL_MS;
        if self.audio.has_ended() {
            // The track looping is expected on long charts; only note
            // exhaustion ends the session.
            debug!("audio ended before note exhaustion, looping");
            if let Err(e) = self.audio.seek(0).and_then(|()| self.audio.play()) {
                warn!("audio loop restart failed: {e:#}");
            }
        }
    }

    fn finish(&mut self) {
        if let Some(session) = &self.session {
            self.result = Some(PlayResult::from(session.score()));
        }
        self.phase = PlayPhase::Finished;
        if let Err(e) = self.audio.stop() {
            warn!("audio stop on finish failed: {e:#}");
        }
        if let Some(result) = &self.result {
            info!(
                score = result.score,
                max_combo = result.max_combo,
                accuracy = result.accuracy,
                "session finished"
            );
        }
    }
}
