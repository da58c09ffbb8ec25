//! Parser for the osu! section/CSV hybrid chart format.
//!
//! Charts are converted straight into the two-lane note model: circles map by
//! x-position and hit sound, sliders become a head plus rim ticks, spinners
//! become a run of center hits. Malformed lines are skipped so that partially
//! broken community charts still load.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::model::{Beatmap, DifficultyTier, Lane, Note};

/// Spinners emit a center note at this interval.
const SPINNER_TICK_MS: i64 = 200;
/// Plain hits at or beyond this x column default to the rim lane.
const RIM_X_THRESHOLD: i64 = 256;
/// Whistle (2) and clap (8) bits force a rim hit regardless of position.
const RIM_HIT_SOUND_MASK: u32 = 0x2 | 0x8;

const TYPE_SLIDER: u32 = 0x2;
const TYPE_SPINNER: u32 = 0x8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    General,
    Metadata,
    Difficulty,
    TimingPoints,
    HitObjects,
    Other,
}

impl Section {
    fn from_name(name: &str) -> Self {
        match name {
            "General" => Self::General,
            "Metadata" => Self::Metadata,
            "Difficulty" => Self::Difficulty,
            "TimingPoints" => Self::TimingPoints,
            "HitObjects" => Self::HitObjects,
            _ => Self::Other,
        }
    }
}

/// Raw fields of one `[HitObjects]` line. Lives only long enough to be
/// converted into notes.
#[derive(Debug)]
struct HitObjectRecord {
    x: i64,
    time_ms: i64,
    type_bits: u32,
    hit_sound_bits: u32,
    slider_repeats: Option<i64>,
    slider_duration_ms: Option<i64>,
    spinner_end_time_ms: Option<i64>,
}

/// Parse chart text into a beatmap.
///
/// Never fails on structure: unknown sections, unknown keys, and malformed
/// hit-object lines are ignored. Missing metadata falls back to
/// "Unknown Song" / "Unknown Artist" / medium difficulty.
pub fn parse(source: &str) -> Beatmap {
    let mut title: Option<String> = None;
    let mut artist: Option<String> = None;
    let mut audio_filename: Option<String> = None;
    let mut timing_offset_ms: i64 = 0;
    let mut difficulty = DifficultyTier::default();
    let mut bpm: Option<u32> = None;
    let mut notes: Vec<Note> = Vec::new();
    let mut section = Section::Other;

    for raw_line in source.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            section = Section::from_name(name);
            continue;
        }
        match section {
            Section::General | Section::Metadata => {
                if let Some((key, value)) = split_key_value(line) {
                    match key {
                        "Title" => title = Some(value.to_string()),
                        "Artist" => artist = Some(value.to_string()),
                        "AudioFilename" => audio_filename = Some(value.to_string()),
                        "AudioLeadIn" => {
                            if let Ok(lead_in) = value.parse() {
                                timing_offset_ms = lead_in;
                            }
                        }
                        _ => {}
                    }
                }
            }
            Section::Difficulty => {
                if let Some(("OverallDifficulty", value)) = split_key_value(line) {
                    if let Ok(od) = value.parse::<f64>() {
                        difficulty = DifficultyTier::from_overall_difficulty(od);
                    }
                }
            }
            Section::TimingPoints => {
                // Only the first uninherited (positive beat length) point
                // defines the BPM; later timing lines are ignored.
                if bpm.is_none() {
                    if let Some(beat_length) = parse_beat_length(line) {
                        bpm = Some((60_000.0 / beat_length).round() as u32);
                    }
                }
            }
            Section::HitObjects => match parse_hit_object(line) {
                Some(record) => emit_notes(&record, &mut notes),
                None => debug!(line, "skipping malformed hit object"),
            },
            Section::Other => {}
        }
    }

    let mut map = Beatmap::new(
        title.unwrap_or_else(|| "Unknown Song".to_string()),
        artist.unwrap_or_else(|| "Unknown Artist".to_string()),
        difficulty,
        notes,
    );
    map.audio_filename = audio_filename;
    map.bpm = bpm;
    map.timing_offset_ms = timing_offset_ms;
    map
}

/// Stable identifier for a chart: hex SHA-256 of its raw text. High scores
/// are keyed by this, so re-imports of the same chart share a record.
pub fn chart_id(source: &str) -> String {
    format!("{:x}", Sha256::digest(source.as_bytes()))
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

fn parse_beat_length(line: &str) -> Option<f64> {
    let mut fields = line.split(',');
    let _offset = fields.next()?;
    let beat_length: f64 = fields.next()?.trim().parse().ok()?;
    (beat_length > 0.0).then_some(beat_length)
}

fn parse_int(field: &str) -> Option<i64> {
    field.trim().parse().ok()
}

fn parse_hit_object(line: &str) -> Option<HitObjectRecord> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 4 {
        return None;
    }
    let x = parse_int(parts[0])?;
    let time_ms = parse_int(parts[2])?;
    let type_bits: u32 = parts[3].trim().parse().ok()?;
    let hit_sound_bits: u32 = parts
        .get(4)
        .and_then(|f| f.trim().parse().ok())
        .unwrap_or(0);
    // Slider length fields carry decimals in the wild; truncate to whole
    // milliseconds.
    let slider_duration_ms = parts
        .get(7)
        .and_then(|f| f.trim().parse::<f64>().ok())
        .map(|v| v as i64);
    Some(HitObjectRecord {
        x,
        time_ms,
        type_bits,
        hit_sound_bits,
        slider_repeats: parts.get(6).and_then(|f| parse_int(f)),
        slider_duration_ms,
        spinner_end_time_ms: parts.get(5).and_then(|f| parse_int(f)),
    })
}

fn emit_notes(record: &HitObjectRecord, out: &mut Vec<Note>) {
    if record.type_bits & TYPE_SPINNER != 0 {
        // A run of center hits across the spinner body, one at minimum.
        let end = record.spinner_end_time_ms.unwrap_or(record.time_ms);
        let mut t = record.time_ms;
        loop {
            out.push(Note::center(t));
            t += SPINNER_TICK_MS;
            if t > end {
                break;
            }
        }
    } else if record.type_bits & TYPE_SLIDER != 0 {
        out.push(Note::center(record.time_ms));
        if let (Some(repeats), Some(duration)) =
            (record.slider_repeats, record.slider_duration_ms)
        {
            if repeats > 0 && duration > 0 {
                // Rim ticks at evenly spaced points inside the slider body.
                let interval = duration as f64 / (repeats + 1) as f64;
                for k in 1..=repeats {
                    let t = record.time_ms + (interval * k as f64).round() as i64;
                    out.push(Note::rim(t));
                }
            }
        }
    } else {
        let rim = record.x >= RIM_X_THRESHOLD
            || record.hit_sound_bits & RIM_HIT_SOUND_MASK != 0;
        let lane = if rim { Lane::Rim } else { Lane::Center };
        out.push(Note::new(record.time_ms, lane));
    }
}
