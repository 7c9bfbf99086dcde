//! Playback engine behavior under deterministic clocks.
//!
//! Drives the engine through `play_at`/`tick_at` so wall-clock scheduling
//! quirks (late ticks, zero-duration steps, stale ticks) are reproducible.

use fitloop_core::{
    NotificationSink, PlaybackEngine, PlaybackError, PlaybackState, Series, Step,
};
use proptest::prelude::*;

#[derive(Default)]
struct RecordingSink {
    boundaries: Vec<String>,
    completions: Vec<String>,
}

impl NotificationSink for RecordingSink {
    fn on_step_boundary(&mut self, step_name: &str) {
        self.boundaries.push(step_name.to_string());
    }
    fn on_series_complete(&mut self, series_name: &str) {
        self.completions.push(series_name.to_string());
    }
}

fn series_of(name: &str, durations: &[u64]) -> Series {
    let mut s = Series::new(name);
    for (i, &d) in durations.iter().enumerate() {
        s.steps.push(Step::new(format!("Step {}", i + 1), d));
    }
    s
}

/// Tick right at each step boundary until the session ends.
fn run_to_completion(engine: &mut PlaybackEngine, sink: &mut RecordingSink, start_ms: u64) {
    let mut now = start_ms;
    while engine.state() == PlaybackState::Running {
        let duration = engine
            .current_step()
            .expect("running engine has a current step")
            .duration_ms;
        now += duration;
        engine.tick_at(now, sink);
    }
}

#[test]
fn every_step_notified_once_in_order_then_completion() {
    let mut engine = PlaybackEngine::new();
    let mut sink = RecordingSink::default();
    let series = series_of("Workout", &[1_000, 2_000, 3_000]);

    engine.play_at(&series, 0).unwrap();
    run_to_completion(&mut engine, &mut sink, 0);

    assert_eq!(sink.boundaries, ["Step 1", "Step 2", "Step 3"]);
    assert_eq!(sink.completions, ["Workout"]);
    assert_eq!(engine.state(), PlaybackState::Completed);
}

#[test]
fn zero_duration_steps_are_visited_not_coalesced() {
    let mut engine = PlaybackEngine::new();
    let mut sink = RecordingSink::default();
    let series = series_of("Sprints", &[0, 5_000]);

    engine.play_at(&series, 100).unwrap();
    // First tick: the zero-duration step is due immediately, the non-zero
    // one is not.
    let events = engine.tick_at(100, &mut sink);
    assert_eq!(events.len(), 1);
    assert_eq!(sink.boundaries, ["Step 1"]);
    assert_eq!(engine.remaining_ms_at(100), Some(5_000));

    engine.tick_at(5_100, &mut sink);
    assert_eq!(sink.boundaries, ["Step 1", "Step 2"]);
    assert_eq!(sink.completions.len(), 1);
}

#[test]
fn adjacent_zero_duration_steps_each_fire() {
    let mut engine = PlaybackEngine::new();
    let mut sink = RecordingSink::default();
    let series = series_of("Instant", &[0, 0, 1_000]);

    engine.play_at(&series, 0).unwrap();
    engine.tick_at(0, &mut sink);
    assert_eq!(sink.boundaries, ["Step 1", "Step 2"]);

    engine.tick_at(1_000, &mut sink);
    assert_eq!(sink.boundaries, ["Step 1", "Step 2", "Step 3"]);
    assert_eq!(sink.completions.len(), 1);
}

#[test]
fn severely_delayed_tick_advances_one_step_without_double_fire() {
    let mut engine = PlaybackEngine::new();
    let mut sink = RecordingSink::default();
    let series = series_of("Run", &[10_000, 20_000]);

    engine.play_at(&series, 0).unwrap();
    // Tick arrives 5x the first step's duration late.
    let events = engine.tick_at(50_000, &mut sink);

    assert_eq!(events.len(), 1);
    assert_eq!(sink.boundaries, ["Step 1"]);
    // The late arrival is absorbed: the second step restarts its full
    // countdown from the tick that crossed the boundary.
    assert_eq!(engine.step_index(), Some(1));
    assert_eq!(engine.remaining_ms_at(50_000), Some(20_000));
}

#[test]
fn stop_then_stale_tick_fires_nothing() {
    let mut engine = PlaybackEngine::new();
    let mut sink = RecordingSink::default();
    let series = series_of("Short", &[100]);

    engine.play_at(&series, 0).unwrap();
    let scheduled_against = engine.generation();
    engine.stop();

    // The tick was scheduled before stop() and delivered after.
    let events = engine.tick_scheduled(scheduled_against, &mut sink);
    assert!(events.is_empty());
    assert!(sink.boundaries.is_empty());
    assert!(sink.completions.is_empty());
}

#[test]
fn play_rejects_empty_series_without_starting() {
    let mut engine = PlaybackEngine::new();
    let err = engine.play_at(&Series::new("Empty"), 0).unwrap_err();
    assert!(matches!(err, PlaybackError::EmptySeries { .. }));
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert!(engine.remaining_ms_at(0).is_none());
}

#[test]
fn pomodoro_scenario_end_to_end() {
    let mut engine = PlaybackEngine::new();
    let mut sink = RecordingSink::default();
    let mut series = Series::new("Pomodoro");
    series.steps.push(Step::new("Work", 1_500_000));
    series.steps.push(Step::new("Break", 300_000));

    engine.play_at(&series, 0).unwrap();
    assert_eq!(engine.current_step().unwrap().name, "Work");

    // 1,500,000 ms elapse.
    engine.tick_at(1_500_000, &mut sink);
    assert_eq!(sink.boundaries, ["Work"]);
    assert!(sink.completions.is_empty());
    assert_eq!(engine.current_step().unwrap().name, "Break");
    assert_eq!(engine.remaining_ms_at(1_500_000), Some(300_000));

    // Another 300,000 ms.
    engine.tick_at(1_800_000, &mut sink);
    assert_eq!(sink.boundaries, ["Work", "Break"]);
    assert_eq!(sink.completions, ["Pomodoro"]);
    assert_eq!(engine.state(), PlaybackState::Completed);
}

proptest! {
    /// Any series of N steps fires exactly N boundaries, in order, and one
    /// completion.
    #[test]
    fn notification_counts_hold_for_arbitrary_series(
        durations in prop::collection::vec(0u64..600_000, 1..8),
        start in 0u64..1_000_000_000,
    ) {
        let series = series_of("Prop", &durations);
        let expected: Vec<String> = series.steps.iter().map(|s| s.name.clone()).collect();

        let mut engine = PlaybackEngine::new();
        let mut sink = RecordingSink::default();
        engine.play_at(&series, start).unwrap();
        run_to_completion(&mut engine, &mut sink, start);

        prop_assert_eq!(sink.boundaries, expected);
        prop_assert_eq!(sink.completions.len(), 1);
        prop_assert_eq!(engine.state(), PlaybackState::Completed);
    }

    /// Remaining time stays inside [0, duration] no matter when it is read.
    #[test]
    fn remaining_is_always_clamped(
        duration in 1u64..600_000,
        read_at in 0u64..10_000_000,
    ) {
        let series = series_of("Clamp", &[duration]);
        let mut engine = PlaybackEngine::new();
        engine.play_at(&series, 0).unwrap();

        let remaining = engine.remaining_ms_at(read_at).unwrap();
        prop_assert!(remaining <= duration);
    }
}
