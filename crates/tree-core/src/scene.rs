//! The per-frame choreography: owns every population, the photo wall and the
//! camera rig, and turns an [`InteractionState`] into instance buffers.

use crate::camera::CameraRig;
use crate::constants::*;
use crate::distribution::Cone;
use crate::motion::{evaluate_into, tree_rotation, FrameInputs, InstanceData};
use crate::photo::{PanelFrame, PhotoSlot, PhotoWall};
use crate::pick::pick_panel;
use crate::population::{Population, PopulationBuilder, PopulationKind, Shape};
use crate::progress::{approach, SmoothedProgress, Smoothing};
use crate::state::InteractionState;
use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Member count per population.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationCounts {
    pub needles: usize,
    pub bulbs: usize,
    pub lights: usize,
    pub gifts: usize,
    pub orbs: usize,
    pub cinematic_orbs: usize,
    pub snow: usize,
    pub dust: usize,
    pub glow: usize,
}

impl Default for PopulationCounts {
    fn default() -> Self {
        Self {
            needles: NEEDLE_COUNT,
            bulbs: BULB_COUNT,
            lights: LIGHT_COUNT,
            gifts: GIFT_COUNT,
            orbs: ORB_COUNT,
            cinematic_orbs: CINEMATIC_COUNT,
            snow: SNOW_COUNT,
            dust: DUST_COUNT,
            glow: GLOW_COUNT,
        }
    }
}

impl PopulationCounts {
    pub fn get(&self, kind: PopulationKind) -> usize {
        match kind {
            PopulationKind::Needles => self.needles,
            PopulationKind::Bulbs => self.bulbs,
            PopulationKind::Lights => self.lights,
            PopulationKind::Gifts => self.gifts,
            PopulationKind::Orbs => self.orbs,
            PopulationKind::CinematicOrbs => self.cinematic_orbs,
            PopulationKind::Snow => self.snow,
            PopulationKind::Dust => self.dust,
            PopulationKind::Glow => self.glow,
        }
    }

    /// Same proportions scaled by `factor` (at least one member each).
    pub fn scaled(&self, factor: f32) -> Self {
        let s = |n: usize| ((n as f32 * factor).round() as usize).max(1);
        Self {
            needles: s(self.needles),
            bulbs: s(self.bulbs),
            lights: s(self.lights),
            gifts: s(self.gifts),
            orbs: s(self.orbs),
            cinematic_orbs: s(self.cinematic_orbs),
            snow: s(self.snow),
            dust: s(self.dust),
            glow: s(self.glow),
        }
    }
}

/// Runtime-tunable scene parameters. `Default` reproduces the constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    pub counts: PopulationCounts,
    pub tree_height: f32,
    pub tree_radius: f32,
    pub smoothing: Smoothing,
    pub photo_face_threshold: f32,
    pub follow_vertical: bool,
    pub seed: Option<u64>,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            counts: PopulationCounts::default(),
            tree_height: TREE_HEIGHT,
            tree_radius: TREE_RADIUS,
            smoothing: Smoothing::default(),
            photo_face_threshold: PHOTO_FACE_CAMERA_THRESHOLD,
            follow_vertical: false,
            seed: None,
        }
    }
}

impl SceneParams {
    pub fn cone(&self) -> Cone {
        Cone {
            height: self.tree_height,
            base_radius: self.tree_radius,
        }
    }
}

/// One population with its display progress and output buffer.
#[derive(Clone, Debug)]
pub struct PopulationLayer {
    population: Population,
    display: SmoothedProgress,
    visible: bool,
    instances: Vec<InstanceData>,
}

impl PopulationLayer {
    pub fn population(&self) -> &Population {
        &self.population
    }
    pub fn display_progress(&self) -> f32 {
        self.display.value()
    }
    pub fn is_visible(&self) -> bool {
        self.visible
    }
    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }
}

/// Tree-top star transform, tree-local.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPose {
    pub position: Vec3,
    pub spin: f32,
    pub scale: f32,
}

/// Receives one frame's output. Implemented by the renderer bridge.
pub trait RenderSink {
    fn population(&mut self, kind: PopulationKind, shape: Shape, model: Mat4, instances: &[InstanceData]);
    fn photos(&mut self, model: Mat4, slots: &[PhotoSlot]);
    fn star(&mut self, model: Mat4, star: &StarPose, halo_opacity: f32);
}

pub struct TreeScene {
    params: SceneParams,
    layers: Vec<PopulationLayer>,
    index: FnvHashMap<PopulationKind, usize>,
    photos: PhotoWall,
    photos_revision: u64,
    camera: CameraRig,
    wind: f32,
    wind_ease: Smoothing,
    rotation_y: f32,
    time: f32,
    star: StarPose,
    halo_opacity: f32,
}

impl TreeScene {
    pub fn new(params: SceneParams, aspect: f32) -> Self {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let cone = params.cone();
        let mut layers = Vec::with_capacity(PopulationKind::ALL.len());
        let mut index = FnvHashMap::default();
        for kind in PopulationKind::ALL {
            let population = PopulationBuilder::preset(kind)
                .count(params.counts.get(kind))
                .cone(cone)
                .build(&mut rng);
            index.insert(kind, layers.len());
            layers.push(PopulationLayer {
                instances: Vec::with_capacity(population.len()),
                population,
                display: SmoothedProgress::new(params.smoothing),
                visible: true,
            });
        }
        let total: usize = layers.iter().map(|l| l.population.len()).sum();
        log::info!("[scene] built {} populations, {} members", layers.len(), total);

        Self {
            photos: PhotoWall::new(cone, params.photo_face_threshold, params.smoothing),
            photos_revision: 0,
            camera: CameraRig::new(aspect, params.follow_vertical, params.smoothing),
            wind: 0.0,
            wind_ease: params.smoothing.with_legacy_factor(LEGACY_SMOOTHING_FACTOR),
            rotation_y: 0.0,
            time: 0.0,
            star: StarPose {
                position: Vec3::new(0.0, cone.height / 2.0 + STAR_LIFT, 0.0),
                spin: 0.0,
                scale: 1.0,
            },
            halo_opacity: 0.7,
            layers,
            index,
            params,
        }
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }
    pub fn layers(&self) -> &[PopulationLayer] {
        &self.layers
    }
    pub fn layer(&self, kind: PopulationKind) -> Option<&PopulationLayer> {
        self.index.get(&kind).map(|&i| &self.layers[i])
    }
    pub fn instances(&self, kind: PopulationKind) -> &[InstanceData] {
        self.layer(kind).map(|l| l.instances()).unwrap_or(&[])
    }
    pub fn photo_wall(&self) -> &PhotoWall {
        &self.photos
    }
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }
    pub fn wind(&self) -> f32 {
        self.wind
    }
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }
    pub fn elapsed(&self) -> f32 {
        self.time
    }
    pub fn star(&self) -> &StarPose {
        &self.star
    }
    pub fn halo_opacity(&self) -> f32 {
        self.halo_opacity
    }
    pub fn tree_rotation(&self) -> Quat {
        tree_rotation(self.rotation_y)
    }

    /// Advance one frame.
    pub fn frame(&mut self, state: &InteractionState, dt: Duration) {
        let dt_s = dt.as_secs_f32();
        self.time += dt_s;
        let t = self.time;

        let velocity = if state.active_photo().is_some() {
            0.0
        } else if state.rotation_velocity() == 0.0 {
            IDLE_ROTATION_SPEED
        } else {
            state.rotation_velocity()
        };
        self.rotation_y += velocity * dt_s;

        self.wind = approach(
            self.wind,
            state.rotation_velocity() * WIND_GAIN,
            self.wind_ease.factor(dt),
        );
        self.camera.update(state.camera_vertical_target(), dt);

        let target = state.progress();
        let show_decorations = state.decorations_visible();
        for layer in &mut self.layers {
            let kind = layer.population.kind();
            layer.visible = show_decorations || !kind.is_decoration();
            if !layer.visible {
                layer.display.reset();
                layer.instances.clear();
                continue;
            }
            let progress = layer.display.step(target, dt);
            let inputs = FrameInputs {
                time: t,
                progress,
                wind: self.wind,
            };
            evaluate_into(&layer.population, &inputs, &mut layer.instances);
        }

        let p = self
            .layer(PopulationKind::Needles)
            .map(|l| l.display_progress())
            .unwrap_or(target);
        let cone = self.params.cone();
        self.star = StarPose {
            position: Vec3::new(
                0.0,
                cone.height / 2.0 + STAR_LIFT + p * 2.0 + t.sin() * 0.2 * p,
                0.0,
            ),
            spin: t * STAR_SPIN_RATE,
            scale: 1.0 + (t * 2.0).sin() * 0.05,
        };
        self.halo_opacity = 0.7 + (t * 1.2).sin() * 0.2;

        if state.photos_revision() != self.photos_revision {
            self.photos.assign(state.photos());
            self.photos_revision = state.photos_revision();
        }
        let cam = self.camera.camera();
        let anchor_world = cam.eye + cam.forward() * PHOTO_ACTIVE_DISTANCE;
        let anchor_local = self.tree_rotation().inverse() * anchor_world;
        self.photos.update(&PanelFrame {
            progress: target,
            active: state.active_photo(),
            active_anchor: anchor_local,
            time: t,
            dt,
        });
    }

    /// Photo slot under a canvas pixel, if any.
    pub fn pick_photo(&self, sx: f32, sy: f32, width: f32, height: f32) -> Option<usize> {
        let (origin, dir) = self.camera.camera().screen_ray(sx, sy, width, height);
        pick_panel(
            origin,
            dir,
            self.tree_rotation(),
            self.photos.slots().iter().map(|s| &s.pose),
        )
    }

    /// Hand the current frame to a renderer.
    pub fn submit<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        let tree_model = Mat4::from_quat(self.tree_rotation());
        for layer in self.layers.iter().filter(|l| l.visible) {
            let kind = layer.population.kind();
            let model = if kind.follows_tree_rotation() {
                tree_model
            } else {
                Mat4::IDENTITY
            };
            sink.population(kind, kind.shape(), model, &layer.instances);
        }
        sink.photos(tree_model, self.photos.slots());
        sink.star(tree_model, &self.star, self.halo_opacity);
    }
}
