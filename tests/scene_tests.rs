// End-to-end frames through the scene: progress, decorations, photos, picking.

use glam::{Mat4, Vec3};
use instant::Instant;
use std::time::Duration;
use tree_core::{
    Facing, GestureAdapter, HandReading, InstanceData, InteractionState, PanelMode, PhotoSlot,
    PopulationCounts, PopulationKind, RenderSink, SceneParams, Shape, StarPose, TreeScene,
};

const DT: Duration = Duration::from_micros(16_667);

fn small_scene(seed: u64) -> TreeScene {
    let params = SceneParams {
        counts: PopulationCounts::default().scaled(0.02),
        seed: Some(seed),
        ..SceneParams::default()
    };
    TreeScene::new(params, 1.0)
}

fn run(scene: &mut TreeScene, state: &InteractionState, frames: usize) {
    for _ in 0..frames {
        scene.frame(state, DT);
    }
}

#[derive(Default)]
struct Tally {
    populations: Vec<(PopulationKind, usize, Mat4)>,
    photos: usize,
    stars: usize,
}

impl RenderSink for Tally {
    fn population(&mut self, kind: PopulationKind, _shape: Shape, model: Mat4, instances: &[InstanceData]) {
        self.populations.push((kind, instances.len(), model));
    }
    fn photos(&mut self, _model: Mat4, slots: &[PhotoSlot]) {
        self.photos += slots.len();
    }
    fn star(&mut self, _model: Mat4, _star: &StarPose, _halo_opacity: f32) {
        self.stars += 1;
    }
}

#[test]
fn palm_then_fist_round_trips_progress() {
    let mut scene = small_scene(1);
    let mut state = InteractionState::new();
    let mut adapter = GestureAdapter::default();
    let start = Instant::now();
    let palm = HandReading::from_label("Open_Palm", 0.5, 0.5).unwrap();
    let fist = HandReading::from_label("Closed_Fist", 0.5, 0.5).unwrap();

    for i in 0..25u32 {
        adapter.apply(Some(palm), start + DT * i, &mut state);
        scene.frame(&state, DT);
        let shown = scene.layer(PopulationKind::Needles).unwrap().display_progress();
        assert!(shown <= state.progress() + 1e-6);
    }
    assert!((state.progress() - 0.5).abs() < 1e-5);

    for i in 25..55u32 {
        adapter.apply(Some(fist), start + DT * i, &mut state);
        scene.frame(&state, DT);
    }
    assert_eq!(state.progress(), 0.0);
}

#[test]
fn first_frame_shows_the_assembled_tree() {
    let mut scene = small_scene(2);
    let state = InteractionState::new();
    scene.frame(&state, DT);
    let layer = scene.layer(PopulationKind::Needles).unwrap();
    assert_eq!(layer.display_progress(), 0.0);
    for (member, inst) in layer.population().members().iter().zip(layer.instances()) {
        assert_eq!(Vec3::from(inst.pos), member.assembled);
    }
}

#[test]
fn every_visible_member_gets_an_instance() {
    let mut scene = small_scene(3);
    let state = InteractionState::new();
    scene.frame(&state, DT);
    for layer in scene.layers() {
        assert!(layer.is_visible());
        assert_eq!(layer.instances().len(), layer.population().len());
    }
}

#[test]
fn hidden_decorations_are_skipped_and_reset() {
    let mut scene = small_scene(4);
    let mut state = InteractionState::new();
    state.set_progress(1.0);
    run(&mut scene, &state, 30);
    assert!(scene.layer(PopulationKind::Bulbs).unwrap().display_progress() > 0.5);

    state.toggle_decorations();
    scene.frame(&state, DT);
    for kind in PopulationKind::ALL {
        let layer = scene.layer(kind).unwrap();
        if kind.is_decoration() {
            assert!(!layer.is_visible(), "{kind:?} still visible");
            assert!(layer.instances().is_empty());
            assert_eq!(layer.display_progress(), 0.0);
        } else {
            assert_eq!(layer.instances().len(), layer.population().len());
        }
    }

    let mut tally = Tally::default();
    scene.submit(&mut tally);
    assert!(tally.populations.iter().all(|(k, _, _)| !k.is_decoration()));

    state.toggle_decorations();
    scene.frame(&state, DT);
    let bulbs = scene.layer(PopulationKind::Bulbs).unwrap();
    assert_eq!(bulbs.instances().len(), bulbs.population().len());
}

#[test]
fn same_seed_builds_the_same_tree() {
    let a = small_scene(9);
    let b = small_scene(9);
    let first = |s: &TreeScene| s.layer(PopulationKind::Needles).unwrap().population().members()[0];
    assert_eq!(first(&a), first(&b));
}

#[test]
fn tree_idles_until_a_photo_is_active() {
    let mut scene = small_scene(5);
    let mut state = InteractionState::new();
    run(&mut scene, &state, 60);
    assert!((scene.rotation_y() - 0.05).abs() < 1e-3);

    state.select_photo(2).unwrap();
    let frozen = scene.rotation_y();
    run(&mut scene, &state, 60);
    assert_eq!(scene.rotation_y(), frozen);
}

#[test]
fn photos_fill_slots_in_order() {
    let mut scene = small_scene(6);
    let mut state = InteractionState::new();
    scene.frame(&state, DT);
    assert_eq!(scene.photo_wall().slots()[0].source.label(), "PHOTO #1");

    state.add_photos(["a.jpg", "b.jpg"]);
    scene.frame(&state, DT);
    let slots = scene.photo_wall().slots();
    assert_eq!(slots.len(), 14);
    assert!(!slots[0].source.is_placeholder());
    assert!(!slots[1].source.is_placeholder());
    assert_eq!(slots[2].source.label(), "PHOTO #3");
}

#[test]
fn extra_photos_are_not_shown() {
    let mut scene = small_scene(6);
    let mut state = InteractionState::new();
    state.add_photos((0..20).map(|i| format!("p{i}.jpg")));
    scene.frame(&state, DT);
    let slots = scene.photo_wall().slots();
    assert_eq!(slots.len(), 14);
    assert!(slots.iter().all(|s| !s.source.is_placeholder()));
}

#[test]
fn docked_panels_face_the_camera_once_scattered_enough() {
    let mut scene = small_scene(7);
    let mut state = InteractionState::new();
    state.set_progress(0.5);
    scene.frame(&state, DT);
    let slots = scene.photo_wall().slots();
    assert!(slots.iter().all(|s| matches!(s.pose.facing, Facing::Toward(_))));

    state.set_progress(0.7);
    scene.frame(&state, DT);
    let slots = scene.photo_wall().slots();
    assert!(slots.iter().all(|s| s.pose.facing == Facing::Camera));
}

#[test]
fn active_photo_flies_in_front_of_the_camera_and_can_be_picked() {
    let mut scene = small_scene(8);
    let mut state = InteractionState::new();
    assert_eq!(state.select_photo(3).unwrap(), Some(3));
    run(&mut scene, &state, 240);

    let slot = &scene.photo_wall().slots()[3];
    assert_eq!(slot.pose.mode, PanelMode::Active);
    assert!((slot.pose.scale - 2.0).abs() < 1e-3);

    let cam = scene.camera().camera();
    let anchor = cam.eye + cam.forward() * 5.0;
    let world = scene.tree_rotation() * slot.pose.position;
    assert!((world - anchor).length() < 0.05, "panel at {world:?}");

    assert_eq!(scene.pick_photo(50.0, 50.0, 100.0, 100.0), Some(3));
    let others_docked = scene
        .photo_wall()
        .slots()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 3)
        .all(|(_, s)| s.pose.mode == PanelMode::Docked);
    assert!(others_docked);
}

#[test]
fn empty_sky_picks_nothing() {
    let mut scene = small_scene(8);
    let state = InteractionState::new();
    scene.frame(&state, DT);
    assert_eq!(scene.pick_photo(0.0, 0.0, 100.0, 100.0), None);
}

#[test]
fn star_rises_as_the_tree_scatters() {
    let mut scene = small_scene(10);
    let mut state = InteractionState::new();
    scene.frame(&state, DT);
    let assembled_y = scene.star().position.y;
    state.set_progress(1.0);
    run(&mut scene, &state, 300);
    assert!(scene.star().position.y > assembled_y + 1.5);
    assert!((0.5..=0.9).contains(&scene.halo_opacity()));
}

#[test]
fn submit_hands_over_every_visible_layer() {
    let mut scene = small_scene(11);
    let state = InteractionState::new();
    scene.frame(&state, DT);
    let mut tally = Tally::default();
    scene.submit(&mut tally);
    assert_eq!(tally.populations.len(), PopulationKind::ALL.len());
    assert_eq!(tally.photos, 14);
    assert_eq!(tally.stars, 1);
    let dust = tally
        .populations
        .iter()
        .find(|(k, _, _)| *k == PopulationKind::Dust)
        .unwrap();
    assert_eq!(dust.2, Mat4::IDENTITY);
}
