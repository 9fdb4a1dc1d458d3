// Shared interaction state: defaults, photo list and selection.

use tree_core::{CoreError, Gesture, InteractionState, PhotoRef};

#[test]
fn starts_assembled_and_quiet() {
    let state = InteractionState::new();
    assert_eq!(state.progress(), 0.0);
    assert_eq!(state.rotation_velocity(), 0.0);
    assert_eq!(state.camera_vertical_target(), 0.5);
    assert!(state.decorations_visible());
    assert!(!state.music_playing());
    assert!(!state.hand_detected());
    assert_eq!(state.current_gesture(), Gesture::None);
    assert!(state.photos().is_empty());
    assert_eq!(state.active_photo(), None);
}

#[test]
fn selecting_another_photo_replaces_the_active_one() {
    let mut state = InteractionState::new();
    assert_eq!(state.select_photo(3), Ok(Some(3)));
    assert_eq!(state.select_photo(5), Ok(Some(5)));
    assert_eq!(state.active_photo(), Some(5));
}

#[test]
fn selecting_the_active_photo_docks_it() {
    let mut state = InteractionState::new();
    state.select_photo(5).unwrap();
    assert_eq!(state.select_photo(5), Ok(None));
    assert_eq!(state.active_photo(), None);
}

#[test]
fn out_of_range_selection_is_rejected() {
    let mut state = InteractionState::new();
    state.select_photo(2).unwrap();
    assert_eq!(
        state.select_photo(14),
        Err(CoreError::PhotoIndexOutOfRange { index: 14, slots: 14 })
    );
    assert!(state.set_active_photo(Some(99)).is_err());
    assert_eq!(state.active_photo(), Some(2));
    assert!(state.set_active_photo(None).is_ok());
    assert_eq!(state.active_photo(), None);
}

#[test]
fn photos_append_in_order() {
    let mut state = InteractionState::new();
    state.add_photos(["a.jpg", "b.jpg"]);
    state.add_photos(vec![String::from("c.jpg")]);
    let names: Vec<&str> = state.photos().iter().map(|p| p.0.as_str()).collect();
    assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
    assert_eq!(state.photos_revision(), 2);
}

#[test]
fn empty_photo_batch_is_a_no_op() {
    let mut state = InteractionState::new();
    state.add_photos(["a.jpg"]);
    let revision = state.photos_revision();
    state.add_photos(Vec::<PhotoRef>::new());
    assert_eq!(state.photos().len(), 1);
    assert_eq!(state.photos_revision(), revision);
}

#[test]
fn camera_target_is_clamped_and_ignores_nan() {
    let mut state = InteractionState::new();
    state.set_camera_vertical_target(1.5);
    assert_eq!(state.camera_vertical_target(), 1.0);
    state.set_camera_vertical_target(f32::NAN);
    assert_eq!(state.camera_vertical_target(), 1.0);
}

#[test]
fn toggles_flip() {
    let mut state = InteractionState::new();
    state.toggle_decorations();
    state.toggle_music();
    assert!(!state.decorations_visible());
    assert!(state.music_playing());
    state.toggle_decorations();
    assert!(state.decorations_visible());
}
