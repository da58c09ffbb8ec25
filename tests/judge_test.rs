use taiko::game::{
    InputEvent, JudgmentKind, JudgmentSession, TIMING_WINDOW_MS, classify,
};
use taiko::model::{Lane, Note};

fn center_tap(at_clock_ms: i64) -> InputEvent {
    InputEvent {
        lane: Lane::Center,
        at_clock_ms,
    }
}

#[test]
fn classification_thresholds() {
    assert_eq!(classify(0), Some(JudgmentKind::Perfect));
    assert_eq!(classify(100), Some(JudgmentKind::Perfect));
    assert_eq!(classify(101), Some(JudgmentKind::Good));
    assert_eq!(classify(210), Some(JudgmentKind::Good));
    assert_eq!(classify(211), Some(JudgmentKind::Ok));
    assert_eq!(classify(TIMING_WINDOW_MS), Some(JudgmentKind::Ok));
    assert_eq!(classify(TIMING_WINDOW_MS + 1), None);
}

#[test]
fn nearest_matching_note_is_consumed() {
    // Three candidates in the window; the nearest wins even though it is
    // neither first nor last in list order.
    let mut session = JudgmentSession::new(vec![
        Note::center(900),
        Note::center(1050),
        Note::center(1250),
    ]);
    let judgment = session.judge(center_tap(1100)).unwrap();
    assert_eq!(judgment.note.unwrap().time_ms, 1050);
    assert_eq!(judgment.kind, JudgmentKind::Perfect);
    assert_eq!(session.pending_count(), 2);
}

#[test]
fn lane_filter_applies_before_distance() {
    // A rim note is closer, but a center tap must match the center note.
    let mut session = JudgmentSession::new(vec![Note::rim(1000), Note::center(1200)]);
    let judgment = session.judge(center_tap(1010)).unwrap();
    assert_eq!(judgment.note.unwrap().lane, Lane::Center);
    assert_eq!(judgment.note.unwrap().time_ms, 1200);
}

#[test]
fn a_note_is_judged_at_most_once() {
    let mut session = JudgmentSession::new(vec![Note::center(1000)]);
    let first = session.judge(center_tap(1000)).unwrap();
    assert_eq!(first.kind, JudgmentKind::Perfect);

    // The second tap has no candidate left.
    let second = session.judge(center_tap(1000)).unwrap();
    assert_eq!(second.kind, JudgmentKind::Miss);
    assert!(second.note.is_none());
    assert_eq!(session.pending_count(), 0);
}

#[test]
fn pending_count_decreases_by_exactly_one_per_event() {
    let notes: Vec<Note> = (0..5).map(|k| Note::center(1000 + k * 400)).collect();
    let mut session = JudgmentSession::new(notes);

    session.judge(center_tap(1000));
    assert_eq!(session.pending_count(), 4);

    // One expiry sweep past the second note only.
    let missed = session.expire(1701);
    assert_eq!(missed.len(), 1);
    assert_eq!(session.pending_count(), 3);
}

#[test]
fn expiry_is_idempotent() {
    let mut session = JudgmentSession::new(vec![Note::center(1000), Note::center(2000)]);
    assert_eq!(session.expire(1301).len(), 1);
    assert_eq!(session.expire(1301).len(), 0);
    assert_eq!(session.expire(1500).len(), 0);
    assert_eq!(session.score().miss_count, 1);
}

#[test]
fn whiff_resets_combo_without_consuming() {
    let mut session = JudgmentSession::new(vec![Note::center(1000), Note::center(1500)]);
    session.judge(center_tap(1000));
    assert_eq!(session.score().combo, 1);

    let whiff = session
        .judge(InputEvent {
            lane: Lane::Rim,
            at_clock_ms: 1500,
        })
        .unwrap();
    assert_eq!(whiff.kind, JudgmentKind::Miss);
    assert_eq!(session.score().combo, 0);
    assert_eq!(session.pending_count(), 1);
}

#[test]
fn input_before_clock_start_is_a_no_op() {
    let mut session = JudgmentSession::new(vec![Note::center(200)]);
    assert!(session.judge(center_tap(-1)).is_none());
    assert_eq!(session.pending_count(), 1);
    assert_eq!(session.score().judged_count(), 0);
}

#[test]
fn simultaneous_notes_on_both_lanes_are_independent() {
    let mut session = JudgmentSession::new(vec![Note::center(1000), Note::rim(1000)]);
    let center = session.judge(center_tap(1000)).unwrap();
    let rim = session
        .judge(InputEvent {
            lane: Lane::Rim,
            at_clock_ms: 1000,
        })
        .unwrap();
    assert_eq!(center.kind, JudgmentKind::Perfect);
    assert_eq!(rim.kind, JudgmentKind::Perfect);
    assert!(session.is_exhausted());
}
