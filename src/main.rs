//! Chart inspector and headless autoplay harness.
//!
//! Loads a chart, prints its metadata, and can simulate a complete session
//! with perfectly timed taps against a mock clock and transport. Useful for
//! checking imported charts without a rendering or audio host.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use taiko::chart::ChartLoader;
use taiko::config::{GameSettings, PlayDifficulty};
use taiko::game::InputEvent;
use taiko::model::{Beatmap, Lane};
use taiko::pattern;
use taiko::play::{
    COUNTDOWN_STEP_MS, COUNTDOWN_STEPS, PlayController, PlayPhase, PlayResult, lead_in_delta,
};
use taiko::registry;
use taiko::traits::{AudioTransport, MockAudio, MockTimeProvider, TimeProvider};
use taiko::util::logging::init_logging;

#[derive(Parser)]
#[command(name = "taiko", about = "Chart inspector and headless autoplay harness")]
struct Args {
    /// Path to an .osu chart. The built-in chart is used when omitted.
    chart: Option<PathBuf>,

    /// Route the chart through the hard-mode densifier, regardless of the
    /// saved difficulty setting.
    #[arg(long)]
    hard: bool,

    /// Simulate a full session with perfectly timed taps.
    #[arg(long)]
    autoplay: bool,

    /// Show debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(None, args.verbose)?;
    let settings = GameSettings::load();

    let mut beatmap = match &args.chart {
        Some(path) => ChartLoader::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => registry::default_beatmap(),
    };
    if args.hard || settings.difficulty == PlayDifficulty::Hard {
        beatmap = pattern::densify(&beatmap, &mut rand::rng());
    }

    println!("{} - {}", beatmap.title, beatmap.artist);
    println!("Difficulty: {}", beatmap.difficulty.label());
    match beatmap.bpm {
        Some(bpm) => println!("BPM: {bpm}"),
        None => println!("BPM: unknown"),
    }
    println!("Notes: {}", beatmap.note_count());
    if beatmap.timing_offset_ms != 0 {
        println!("Lead-in offset: {}ms", beatmap.timing_offset_ms);
    }

    if args.autoplay {
        let result = autoplay(beatmap, &settings)?;
        println!();
        println!("Autoplay result:");
        println!("  Score:     {}", result.score);
        println!("  Max combo: {}", result.max_combo);
        println!(
            "  Judgments: {} perfect / {} good / {} ok / {} miss",
            result.perfect_count, result.good_count, result.ok_count, result.miss_count
        );
        println!("  Accuracy:  {:.1}%", result.accuracy);
    }

    Ok(())
}

/// Run a full session against a mock clock, tapping every note exactly on
/// time.
fn autoplay(beatmap: Beatmap, settings: &GameSettings) -> Result<PlayResult> {
    let time = MockTimeProvider::new();
    let mut audio = MockAudio::new();
    if let Some(name) = &beatmap.audio_filename {
        if let Err(e) = audio.load(Path::new(name)) {
            warn!("audio source failed to load, playing silent: {e:#}");
        }
    }
    audio.set_volume(settings.volume)?;
    let mut controller = PlayController::new(beatmap, audio, &time);
    controller.start();

    time.advance(COUNTDOWN_STEPS as i64 * COUNTDOWN_STEP_MS);
    controller.tick();
    anyhow::ensure!(
        controller.phase() == PlayPhase::Active,
        "session did not start"
    );

    let delta = lead_in_delta(controller.beatmap());
    let taps: Vec<(i64, Lane)> = controller
        .beatmap()
        .notes()
        .iter()
        .map(|n| (n.time_ms + delta, n.lane))
        .collect();

    let epoch = time.now_ms();
    for (at_clock_ms, lane) in taps {
        time.set_time(epoch + at_clock_ms);
        controller.tick();
        if let Some(judgment) = controller.input(InputEvent { lane, at_clock_ms }) {
            debug!(at_clock_ms, judgment = judgment.kind.label(), "autoplay tap");
        }
    }

    // Let the settle delay and minimum session length run out.
    for _ in 0..200 {
        if controller.phase() == PlayPhase::Finished {
            break;
        }
        time.advance(100);
        controller.tick();
    }

    controller
        .result()
        .cloned()
        .context("session never finished")
}
