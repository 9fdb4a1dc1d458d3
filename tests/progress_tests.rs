// Authoritative progress clamping and display-side smoothing.

use std::time::Duration;
use tree_core::{clamp_progress, InteractionState, SmoothedProgress, Smoothing};

const FRAME_60: f32 = 1.0 / 60.0;

#[test]
fn writes_are_clamped_to_unit_range() {
    let mut state = InteractionState::new();
    state.set_progress(-0.5);
    assert_eq!(state.progress(), 0.0);
    state.set_progress(1.7);
    assert_eq!(state.progress(), 1.0);
    state.set_progress(0.42);
    assert!((state.progress() - 0.42).abs() < 1e-6);
}

#[test]
fn nudges_saturate_at_the_ends() {
    let mut state = InteractionState::new();
    state.nudge_progress(-0.3);
    assert_eq!(state.progress(), 0.0);
    for _ in 0..80 {
        state.nudge_progress(0.02);
    }
    assert_eq!(state.progress(), 1.0);
}

#[test]
fn nan_is_treated_as_assembled() {
    assert_eq!(clamp_progress(f32::NAN), 0.0);
}

#[test]
fn legacy_smoothing_follows_the_closed_form() {
    let mut display = SmoothedProgress::new(Smoothing::Legacy { factor: 0.05 });
    let dt = Duration::from_secs_f32(FRAME_60);
    let mut prev = display.value();
    for n in 1..=100 {
        let v = display.step(1.0, dt);
        let expected = 1.0 - 0.95f32.powi(n);
        assert!((v - expected).abs() < 1e-4, "frame {n}: {v} vs {expected}");
        assert!(v > prev, "frame {n} did not increase");
        assert!(v <= 1.0);
        prev = v;
    }
}

#[test]
fn smoothing_never_overshoots_downward() {
    let mut display = SmoothedProgress::new(Smoothing::default());
    let dt = Duration::from_secs_f32(FRAME_60);
    for _ in 0..200 {
        display.step(1.0, dt);
    }
    let mut prev = display.value();
    for _ in 0..200 {
        let v = display.step(0.0, dt);
        assert!(v >= 0.0 && v <= prev);
        prev = v;
    }
}

#[test]
fn time_based_smoothing_is_refresh_rate_independent() {
    let mut at_60 = SmoothedProgress::new(Smoothing::default());
    let mut at_144 = SmoothedProgress::new(Smoothing::default());
    for _ in 0..60 {
        at_60.step(1.0, Duration::from_secs_f32(FRAME_60));
    }
    for _ in 0..144 {
        at_144.step(1.0, Duration::from_secs_f32(1.0 / 144.0));
    }
    assert!(
        (at_60.value() - at_144.value()).abs() < 1e-3,
        "{} vs {}",
        at_60.value(),
        at_144.value()
    );
}

#[test]
fn default_matches_legacy_at_sixty_hz() {
    let mut legacy = SmoothedProgress::new(Smoothing::Legacy { factor: 0.05 });
    let mut timed = SmoothedProgress::new(Smoothing::default());
    let dt = Duration::from_secs_f32(FRAME_60);
    for _ in 0..90 {
        legacy.step(1.0, dt);
        timed.step(1.0, dt);
    }
    assert!((legacy.value() - timed.value()).abs() < 2e-3);
}
