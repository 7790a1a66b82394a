//! Behavioral tests for the marquee timeline, driven with synthetic
//! instants — no sleeping, no toolkit.

use std::time::{Duration, Instant};

use marquee_core::{Easing, MarqueeConfig, Redraw, Timeline};

fn linear_config(duration_ms: u64) -> MarqueeConfig {
    MarqueeConfig {
        duration: Duration::from_millis(duration_ms),
        easing: Easing::Linear,
        ..MarqueeConfig::defaults()
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Drive a started timeline through its start and settle delays so that the
/// overflow decision has been made. Returns the decision instant.
fn run_until_decision(timeline: &mut Timeline, t0: Instant) -> Instant {
    timeline.start_animation(t0);
    let tick = timeline.tick(t0);
    let Some(Redraw::At(settle)) = tick.redraw else {
        panic!("expected a settle deadline, got {tick:?}");
    };
    timeline.tick(settle);
    settle
}

#[test]
fn fitting_content_never_moves() {
    let mut timeline = Timeline::new(linear_config(1000), false);
    timeline.update_distance(Some(-25.0));

    let t0 = Instant::now();
    run_until_decision(&mut timeline, t0);

    assert!(timeline.is_animating());
    assert!(timeline.content_fits());
    assert_eq!(timeline.offset(), 0.0);

    // No further wakeups, no motion, no completion.
    let tick = timeline.tick(t0 + ms(5000));
    assert!(!tick.completed);
    assert_eq!(tick.redraw, None);
    assert_eq!(timeline.offset(), 0.0);
}

#[test]
fn overflow_scrolls_to_exactly_minus_distance() {
    // Container 100, text 250 -> distance 150, duration 1000.
    let mut timeline = Timeline::new(linear_config(1000), false);
    timeline.update_distance(Some(250.0 - 100.0));

    let t0 = Instant::now();
    let started = run_until_decision(&mut timeline, t0);

    let tick = timeline.tick(started + ms(500));
    assert_eq!(tick.redraw, Some(Redraw::NextFrame));
    assert!((timeline.offset() - (-75.0)).abs() < 1e-3);

    let tick = timeline.tick(started + ms(1000));
    assert!(tick.completed);
    assert_eq!(timeline.offset(), 0.0);
    assert!(!timeline.is_animating());
}

#[test]
fn completion_is_reported_exactly_once() {
    let mut timeline = Timeline::new(linear_config(1000), false);
    timeline.update_distance(Some(150.0));

    let t0 = Instant::now();
    let started = run_until_decision(&mut timeline, t0);

    let mut completions = 0;
    for offset_ms in [1000, 1100, 2000, 10_000] {
        if timeline.tick(started + ms(offset_ms)).completed {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    // No further motion until explicitly restarted.
    assert_eq!(timeline.tick(started + ms(20_000)).redraw, None);
}

#[test]
fn start_while_animating_is_a_no_op() {
    let mut timeline = Timeline::new(linear_config(1000), false);
    timeline.update_distance(Some(150.0));

    let t0 = Instant::now();
    let started = run_until_decision(&mut timeline, t0);

    timeline.tick(started + ms(400));
    let mid_offset = timeline.offset();
    assert!(mid_offset < 0.0);

    // Starting again must not restart or reschedule the run.
    timeline.start_animation(started + ms(400));
    timeline.tick(started + ms(600));
    assert!(timeline.offset() < mid_offset);

    let tick = timeline.tick(started + ms(1000));
    assert!(tick.completed);
}

#[test]
fn restart_while_pending_replaces_the_deadline() {
    let config = MarqueeConfig {
        start_delay: ms(500),
        ..linear_config(1000)
    };
    let mut timeline = Timeline::new(config, false);

    let t0 = Instant::now();
    timeline.start_animation(t0);
    assert!(!timeline.is_animating());

    // A second start while the delay is pending reschedules; only the new
    // deadline exists.
    timeline.start_animation(t0 + ms(300));
    let tick = timeline.tick(t0 + ms(600));
    assert_eq!(tick.redraw, Some(Redraw::At(t0 + ms(800))));
}

#[test]
fn stop_always_resets_position_and_state() {
    let mut timeline = Timeline::new(linear_config(1000), false);
    timeline.update_distance(Some(150.0));

    let t0 = Instant::now();
    let started = run_until_decision(&mut timeline, t0);
    timeline.tick(started + ms(500));
    assert!(timeline.offset() < 0.0);

    timeline.stop_animation();
    assert_eq!(timeline.offset(), 0.0);
    assert!(!timeline.is_animating());

    // The interrupted run must not be mistaken for a natural finish.
    let tick = timeline.tick(started + ms(2000));
    assert!(!tick.completed);
    assert_eq!(tick.redraw, None);
}

#[test]
fn loop_resets_and_restarts_after_the_delays() {
    let config = MarqueeConfig {
        repeat: true,
        reset_delay: ms(250),
        start_delay: ms(50),
        ..linear_config(1000)
    };
    let mut timeline = Timeline::new(config, false);
    timeline.update_distance(Some(150.0));

    let t0 = Instant::now();
    timeline.start_animation(t0);
    let Some(Redraw::At(settle)) = timeline.tick(t0 + ms(50)).redraw else {
        panic!("expected settle deadline");
    };
    timeline.tick(settle);

    // Natural completion holds the end offset through the reset delay.
    let finished = settle + ms(1000);
    let tick = timeline.tick(finished);
    assert!(!tick.completed, "looping runs do not report completion");
    assert_eq!(tick.redraw, Some(Redraw::At(finished + ms(250))));
    assert_eq!(timeline.offset(), -150.0);

    // Before the reset deadline nothing snaps.
    timeline.tick(finished + ms(100));
    assert_eq!(timeline.offset(), -150.0);

    // At the deadline the position snaps back and the next cycle waits out
    // the start delay again.
    let tick = timeline.tick(finished + ms(250));
    assert_eq!(timeline.offset(), 0.0);
    assert_eq!(tick.redraw, Some(Redraw::At(finished + ms(300))));
}

#[test]
fn configured_reset_delay_is_floored() {
    let config = MarqueeConfig {
        repeat: true,
        reset_delay: ms(10),
        ..linear_config(1000)
    };
    let mut timeline = Timeline::new(config, false);
    timeline.update_distance(Some(150.0));

    let t0 = Instant::now();
    let started = run_until_decision(&mut timeline, t0);

    let finished = started + ms(1000);
    let tick = timeline.tick(finished);
    // 10ms configured, floored to the 100ms minimum.
    assert_eq!(tick.redraw, Some(Redraw::At(finished + ms(100))));
}

#[test]
fn content_change_invalidates_and_restarts() {
    let mut timeline = Timeline::new(linear_config(1000), false);
    timeline.update_distance(Some(150.0));

    let t0 = Instant::now();
    let started = run_until_decision(&mut timeline, t0);
    timeline.tick(started + ms(400));
    let frozen = timeline.offset();
    assert!(frozen < 0.0);

    // Content changed mid-run: the distance is forgotten and the offset
    // holds until the reset deadline, without reporting completion.
    let changed_at = started + ms(400);
    timeline.invalidate_content(changed_at);
    assert_eq!(timeline.distance(), None);

    let tick = timeline.tick(changed_at + ms(50));
    assert!(!tick.completed);
    assert_eq!(timeline.offset(), frozen);

    let tick = timeline.tick(changed_at + ms(100));
    assert!(!tick.completed);
    assert_eq!(timeline.offset(), 0.0);
    assert!(matches!(tick.redraw, Some(Redraw::At(_))));
}

#[test]
fn late_measurement_promotes_an_armed_timeline() {
    // Decision falls before any measurement arrived (distance unknown).
    let mut timeline = Timeline::new(linear_config(1000), true);

    let t0 = Instant::now();
    let decided = run_until_decision(&mut timeline, t0);
    assert!(timeline.is_animating());
    assert_eq!(timeline.offset(), 0.0);

    // A layout event then reports overflow: the next tick starts the run.
    timeline.update_distance(Some(80.0));
    let tick = timeline.tick(decided + ms(30));
    assert_eq!(tick.redraw, Some(Redraw::NextFrame));

    timeline.tick(decided + ms(30) + ms(500));
    assert!((timeline.offset() - (-40.0)).abs() < 1e-3);
}

#[test]
fn measurement_hook_fires_only_at_the_settle_deadline() {
    let mut timeline = Timeline::new(linear_config(1000), false);

    let t0 = Instant::now();
    timeline.start_animation(t0);
    assert!(!timeline.needs_measurement(t0));

    let Some(Redraw::At(settle)) = timeline.tick(t0).redraw else {
        panic!("expected settle deadline");
    };
    assert!(!timeline.needs_measurement(settle - ms(10)));
    assert!(timeline.needs_measurement(settle));

    // Once the decision is made the hook goes quiet again.
    timeline.tick(settle);
    assert!(!timeline.needs_measurement(settle + ms(10)));
}
