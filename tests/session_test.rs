use taiko::game::InputEvent;
use taiko::model::{Beatmap, DifficultyTier, Lane, Note};
use taiko::play::{
    COUNTDOWN_STEP_MS, COUNTDOWN_STEPS, MIN_START_TIME_MS, PlayController, PlayPhase,
    lead_in_delta,
};
use taiko::traits::{AudioTransport, MockAudio, MockTimeProvider, TimeProvider};

const COUNTDOWN_TOTAL_MS: i64 = COUNTDOWN_STEPS as i64 * COUNTDOWN_STEP_MS;

fn chart(notes: Vec<Note>) -> Beatmap {
    Beatmap::new("t", "a", DifficultyTier::Medium, notes)
}

/// Start a controller and run the countdown out; on return the clock reads 0.
fn start_active(
    controller: &mut PlayController<MockAudio, &MockTimeProvider>,
    time: &MockTimeProvider,
) {
    controller.start();
    time.advance(COUNTDOWN_TOTAL_MS);
    controller.tick();
    assert_eq!(controller.phase(), PlayPhase::Active);
}

#[test]
fn countdown_runs_three_steps() {
    let time = MockTimeProvider::new();
    let mut controller = PlayController::new(chart(vec![Note::center(1000)]), MockAudio::new(), &time);

    controller.start();
    assert_eq!(controller.phase(), PlayPhase::Counting);
    assert_eq!(controller.countdown_value(), Some(3));

    time.advance(COUNTDOWN_STEP_MS);
    controller.tick();
    assert_eq!(controller.countdown_value(), Some(2));

    time.advance(COUNTDOWN_STEP_MS);
    controller.tick();
    assert_eq!(controller.countdown_value(), Some(1));

    time.advance(COUNTDOWN_STEP_MS);
    controller.tick();
    assert_eq!(controller.phase(), PlayPhase::Active);
    assert_eq!(controller.countdown_value(), None);
    assert_eq!(controller.clock_ms(), 0);
}

#[test]
fn input_during_countdown_is_ignored() {
    let time = MockTimeProvider::new();
    let mut controller = PlayController::new(chart(vec![Note::center(1000)]), MockAudio::new(), &time);
    controller.start();
    assert!(
        controller
            .input(InputEvent {
                lane: Lane::Center,
                at_clock_ms: 0,
            })
            .is_none()
    );
    assert_eq!(controller.pending_count(), 0);
}

#[test]
fn lead_in_keeps_the_first_note_reachable() {
    // First note at 1000 gets pushed out to the minimum start time.
    let early = chart(vec![Note::center(1000), Note::rim(2000)]);
    assert_eq!(lead_in_delta(&early), 2000);

    // A chart that already starts late only gets its own offset.
    let mut late = chart(vec![Note::center(2800)]);
    late.timing_offset_ms = 500;
    assert_eq!(lead_in_delta(&late), 500);

    let time = MockTimeProvider::new();
    let mut controller = PlayController::new(early, MockAudio::new(), &time);
    start_active(&mut controller, &time);

    // Tapping at the shifted time is a perfect hit.
    time.advance(MIN_START_TIME_MS);
    controller.tick();
    let judgment = controller.tap(Lane::Center).unwrap();
    assert_eq!(judgment.note.unwrap().time_ms, MIN_START_TIME_MS);
    assert_eq!(judgment.score_delta, 100);
}

#[test]
fn two_perfect_hits_score_210() {
    let time = MockTimeProvider::new();
    let mut controller = PlayController::new(
        chart(vec![Note::center(1000), Note::rim(2000)]),
        MockAudio::new(),
        &time,
    );
    start_active(&mut controller, &time);
    assert!(controller.audio().is_playing());
    let epoch = time.now_ms();

    // Notes were shifted to 3000 and 4000 by the lead-in.
    for (at_clock_ms, lane) in [(3000, Lane::Center), (4000, Lane::Rim)] {
        time.set_time(epoch + at_clock_ms);
        controller.tick();
        let judgment = controller.input(InputEvent { lane, at_clock_ms }).unwrap();
        assert_eq!(judgment.note.unwrap().lane, lane);
    }
    let score = controller.score().unwrap();
    assert_eq!(score.score, 210);
    assert_eq!(score.max_combo, 2);

    // Settle delay plus the minimum session length, then results surface.
    time.set_time(epoch + 4100);
    controller.tick();
    assert_eq!(controller.phase(), PlayPhase::Active);

    time.set_time(epoch + 5200);
    controller.tick();
    assert_eq!(controller.phase(), PlayPhase::Finished);
    let result = controller.result().unwrap();
    assert_eq!(result.score, 210);
    assert_eq!(result.max_combo, 2);
    assert_eq!(result.perfect_count, 2);
    assert!(result.is_full_combo());
    assert!(!controller.audio().is_playing());
}

#[test]
fn front_loaded_chart_respects_minimum_session_length() {
    let time = MockTimeProvider::new();
    let mut controller =
        PlayController::new(chart(vec![Note::center(100)]), MockAudio::new(), &time);
    start_active(&mut controller, &time);
    let epoch = time.now_ms();

    time.set_time(epoch + MIN_START_TIME_MS);
    controller.tick();
    controller.tap(Lane::Center).unwrap();
    controller.tick();

    // Settle delay has passed but the 5 second floor has not.
    time.set_time(epoch + 4500);
    controller.tick();
    assert_eq!(controller.phase(), PlayPhase::Active);

    time.set_time(epoch + 5100);
    controller.tick();
    assert_eq!(controller.phase(), PlayPhase::Finished);
}

#[test]
fn unhit_notes_expire_as_misses() {
    let time = MockTimeProvider::new();
    let mut controller = PlayController::new(
        chart(vec![Note::center(1000), Note::rim(1200)]),
        MockAudio::new(),
        &time,
    );
    start_active(&mut controller, &time);
    let epoch = time.now_ms();

    // Both shifted notes (3000, 3200) blow past their windows.
    time.set_time(epoch + 3600);
    let missed = controller.tick();
    assert_eq!(missed.len(), 2);
    assert!(missed.iter().all(|m| m.score_delta == 0));
    let score = controller.score().unwrap();
    assert_eq!(score.miss_count, 2);
    assert_eq!(score.combo, 0);
}

#[test]
fn audio_loops_while_notes_remain() {
    let time = MockTimeProvider::new();
    let mut controller =
        PlayController::new(chart(vec![Note::center(60_000)]), MockAudio::new(), &time);
    start_active(&mut controller, &time);
    assert_eq!(controller.audio().play_calls, 1);

    controller.audio_mut().mark_ended();
    time.advance(300);
    controller.tick();

    assert!(!controller.audio().has_ended());
    assert!(controller.audio().is_playing());
    assert_eq!(controller.audio().seek_calls, 1);
    assert_eq!(controller.audio().play_calls, 2);
    assert_eq!(controller.phase(), PlayPhase::Active);
}

#[test]
fn abandon_stops_the_transport_and_hides_results() {
    let time = MockTimeProvider::new();
    let mut controller =
        PlayController::new(chart(vec![Note::center(1000)]), MockAudio::new(), &time);
    start_active(&mut controller, &time);

    controller.abandon();
    assert_eq!(controller.phase(), PlayPhase::Finished);
    assert!(controller.result().is_none());
    assert_eq!(controller.audio().stop_calls, 1);

    // The session is gone: ticks and taps are no-ops.
    time.advance(10_000);
    assert!(controller.tick().is_empty());
    assert!(controller.tap(Lane::Center).is_none());
}

#[test]
fn audio_failure_never_blocks_judgment() {
    let time = MockTimeProvider::new();
    let mut controller = PlayController::new(
        chart(vec![Note::center(1000)]),
        MockAudio::failing(),
        &time,
    );
    start_active(&mut controller, &time);

    time.advance(MIN_START_TIME_MS);
    controller.tick();
    let judgment = controller.tap(Lane::Center).unwrap();
    assert_eq!(judgment.score_delta, 100);
}

#[test]
fn empty_beatmap_falls_back_to_the_default_chart() {
    let time = MockTimeProvider::new();
    let controller = PlayController::new(chart(Vec::new()), MockAudio::new(), &time);
    assert_eq!(controller.beatmap().title, "Warm-Up");
    assert!(controller.beatmap().note_count() > 0);
}

#[test]
fn clock_is_derived_not_accumulated() {
    let time = MockTimeProvider::new();
    let mut controller =
        PlayController::new(chart(vec![Note::center(60_000)]), MockAudio::new(), &time);
    start_active(&mut controller, &time);
    let epoch = time.now_ms();

    // A jump in wall time shows up in full; no fixed-step drift.
    time.set_time(epoch + 12_345);
    assert_eq!(controller.clock_ms(), 12_345);
}
