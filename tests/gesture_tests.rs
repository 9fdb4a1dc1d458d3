// Gesture adapter: continuous controls, toggle debounce and failure handling.

use instant::Instant;
use std::time::Duration;
use tree_core::{
    rotation_for_hand_x, ClassifierError, Gesture, GestureAdapter, HandReading, InteractionState,
    Toggle, ToggleDebounce,
};

fn hand(label: &str) -> Option<HandReading> {
    Some(HandReading::from_label(label, 0.5, 0.5).unwrap())
}

fn at(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}

#[test]
fn held_victory_fires_once() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    let mut fired = 0;
    for i in 0..5 {
        fired += adapter
            .apply(hand("Victory"), at(start, i * 40), &mut state)
            .len();
    }
    assert_eq!(fired, 1);
    assert!(!state.decorations_visible());
}

#[test]
fn holding_past_the_cooldown_does_not_refire() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    let mut fired = 0;
    for i in 0..30 {
        fired += adapter
            .apply(hand("Victory"), at(start, i * 100), &mut state)
            .len();
    }
    assert_eq!(fired, 1);
}

#[test]
fn victory_again_after_cooldown_fires_twice() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    assert_eq!(
        adapter.apply(hand("Victory"), start, &mut state).as_slice(),
        &[Toggle::Decorations]
    );
    adapter.apply(None, at(start, 600), &mut state);
    assert_eq!(
        adapter
            .apply(hand("Victory"), at(start, 1100), &mut state)
            .as_slice(),
        &[Toggle::Decorations]
    );
    assert!(state.decorations_visible());
}

#[test]
fn reentry_inside_cooldown_is_ignored() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    adapter.apply(hand("Victory"), start, &mut state);
    adapter.apply(hand("None"), at(start, 100), &mut state);
    let fired = adapter.apply(hand("Victory"), at(start, 300), &mut state);
    assert!(fired.is_empty());
    assert!(!state.decorations_visible());
}

#[test]
fn cooldown_boundary_is_strict() {
    let start = Instant::now();
    let mut debounce = ToggleDebounce::new(Gesture::ThumbUp, Duration::from_millis(1000));
    assert!(debounce.observe(Gesture::ThumbUp, start));
    debounce.observe(Gesture::None, at(start, 500));
    assert!(!debounce.observe(Gesture::ThumbUp, at(start, 1000)));
    debounce.observe(Gesture::None, at(start, 1001));
    assert!(debounce.observe(Gesture::ThumbUp, at(start, 1002)));
}

#[test]
fn toggles_debounce_independently() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    adapter.apply(hand("Victory"), start, &mut state);
    let fired = adapter.apply(hand("Thumb_Up"), at(start, 50), &mut state);
    assert_eq!(fired.as_slice(), &[Toggle::Music]);
    assert!(!state.decorations_visible());
    assert!(state.music_playing());
}

#[test]
fn open_palm_and_fist_step_progress() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    for i in 0..25 {
        adapter.apply(hand("Open_Palm"), at(start, i * 33), &mut state);
    }
    assert!((state.progress() - 0.5).abs() < 1e-5);
    for i in 25..55 {
        adapter.apply(hand("Closed_Fist"), at(start, i * 33), &mut state);
    }
    assert_eq!(state.progress(), 0.0);
}

#[test]
fn held_palm_steps_every_render_tick() {
    // classifier at 30 Hz, renderer at 60 Hz
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    for i in 0..20u64 {
        let fresh = (i % 2 == 0).then(|| Ok(hand("Open_Palm")));
        adapter.tick(fresh, at(start, i * 16), &mut state);
    }
    assert!((state.progress() - 0.4).abs() < 1e-5);
}

#[test]
fn repeated_victory_between_classifications_fires_once() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    let mut fired = 0;
    fired += adapter
        .tick(Some(Ok(hand("Victory"))), start, &mut state)
        .len();
    for i in 1..10 {
        fired += adapter.tick(None, at(start, i * 16), &mut state).len();
    }
    assert_eq!(fired, 1);
    assert!(!state.decorations_visible());
}

#[test]
fn tick_without_any_reading_changes_nothing() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    adapter.tick(
        Some(Err(ClassifierError::Frame("video not ready".into()))),
        start,
        &mut state,
    );
    adapter.tick(None, at(start, 16), &mut state);
    assert!(!state.hand_detected());
    assert_eq!(state.progress(), 0.0);
}

#[test]
fn failed_classification_keeps_repeating_the_last_good_one() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    adapter.tick(Some(Ok(hand("Open_Palm"))), start, &mut state);
    adapter.tick(
        Some(Err(ClassifierError::Frame("decode".into()))),
        at(start, 16),
        &mut state,
    );
    adapter.tick(None, at(start, 32), &mut state);
    assert!((state.progress() - 0.04).abs() < 1e-6);
}

#[test]
fn forgotten_reading_is_not_repeated() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    adapter.tick(Some(Ok(hand("Open_Palm"))), start, &mut state);
    adapter.forget();
    adapter.tick(None, at(start, 16), &mut state);
    assert!((state.progress() - 0.02).abs() < 1e-6);
}

#[test]
fn horizontal_zones_pick_rotation() {
    assert_eq!(rotation_for_hand_x(0.1), -0.3);
    assert_eq!(rotation_for_hand_x(0.3), 0.0);
    assert_eq!(rotation_for_hand_x(0.5), 0.0);
    assert_eq!(rotation_for_hand_x(0.7), 0.0);
    assert_eq!(rotation_for_hand_x(0.9), 0.3);
}

#[test]
fn hand_position_drives_rotation_and_camera() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let reading = HandReading::from_label("None", 0.9, 0.2).unwrap();
    adapter.apply(Some(reading), Instant::now(), &mut state);
    assert_eq!(state.rotation_velocity(), 0.3);
    assert!((state.camera_vertical_target() - 0.2).abs() < 1e-6);
    assert!(state.hand_detected());
    assert_eq!(state.current_gesture(), Gesture::None);
}

#[test]
fn losing_the_hand_only_resets_rotation_and_status() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    let reading = HandReading::from_label("Open_Palm", 0.05, 0.8).unwrap();
    adapter.apply(Some(reading), start, &mut state);
    adapter.apply(hand("Victory"), at(start, 40), &mut state);
    let progress = state.progress();

    adapter.apply(None, at(start, 80), &mut state);
    assert!(!state.hand_detected());
    assert_eq!(state.current_gesture(), Gesture::None);
    assert_eq!(state.rotation_velocity(), 0.0);
    assert_eq!(state.progress(), progress);
    assert!((state.camera_vertical_target() - 0.5).abs() < 1e-6);
    assert!(!state.decorations_visible());
}

#[test]
fn failed_frame_leaves_state_untouched() {
    let mut adapter = GestureAdapter::default();
    let mut state = InteractionState::new();
    let start = Instant::now();
    let reading = HandReading::from_label("Open_Palm", 0.9, 0.1).unwrap();
    adapter.ingest(Ok(Some(reading)), start, &mut state);

    let fired = adapter.ingest(
        Err(ClassifierError::Frame("video not ready".into())),
        at(start, 40),
        &mut state,
    );
    assert!(fired.is_empty());
    assert!(state.hand_detected());
    assert_eq!(state.current_gesture(), Gesture::OpenPalm);
    assert_eq!(state.rotation_velocity(), 0.3);
    assert!((state.progress() - 0.02).abs() < 1e-6);
    assert!((state.camera_vertical_target() - 0.1).abs() < 1e-6);
}

#[test]
fn malformed_readings_are_rejected() {
    assert!(HandReading::from_label("Victory", f32::NAN, 0.5).is_err());
    assert!(HandReading::from_label("Victory", 0.5, f32::INFINITY).is_err());
    let clamped = HandReading::from_label("Victory", 1.4, -0.2).unwrap();
    assert_eq!((clamped.x, clamped.y), (1.0, 0.0));
}

#[test]
fn unknown_labels_map_to_other() {
    assert_eq!(Gesture::from_label("Pointing_Up"), Gesture::Other);
    assert_eq!(Gesture::from_label("None"), Gesture::None);
    assert_eq!(Gesture::from_label("Thumb_Up"), Gesture::ThumbUp);
    assert_eq!(Gesture::ThumbUp.as_label(), "Thumb_Up");
}
