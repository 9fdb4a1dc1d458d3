//! Photo panels: fixed slot layout plus the docked/active pose machine.
//!
//! The wall always holds [`PHOTO_SLOTS`] panels. User photos fill the slots in
//! order; the rest show a numbered placeholder. Which panel is active comes
//! from [`InteractionState`](crate::state::InteractionState); the wall only
//! eases each panel toward the pose its mode asks for.

use crate::constants::*;
use crate::distribution::{photo_surface_point, ring_point, Cone};
use crate::progress::{approach, Smoothing};
use crate::state::PhotoRef;
use glam::Vec3;
use std::time::Duration;

/// Content of one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhotoSource {
    Image(PhotoRef),
    /// Empty slot, numbered from 1.
    Placeholder(usize),
}

impl PhotoSource {
    pub fn label(&self) -> String {
        match self {
            PhotoSource::Image(r) => r.0.clone(),
            PhotoSource::Placeholder(n) => format!("PHOTO #{n}"),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PhotoSource::Placeholder(_))
    }
}

/// Where a panel's front face points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Facing {
    /// Look at a point in tree-local space (outward from the surface).
    Toward(Vec3),
    Camera,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelMode {
    Docked,
    Active,
}

/// Current pose of one panel in tree-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPose {
    pub position: Vec3,
    pub scale: f32,
    pub facing: Facing,
    pub mode: PanelMode,
}

#[derive(Clone, Debug)]
pub struct PhotoSlot {
    pub source: PhotoSource,
    pub tree_position: Vec3,
    pub look_at: Vec3,
    pub ring_position: Vec3,
    pub pose: PanelPose,
}

/// Per-frame inputs of [`PhotoWall::update`].
#[derive(Clone, Copy, Debug)]
pub struct PanelFrame {
    pub progress: f32,
    pub active: Option<usize>,
    /// Point in front of the camera, already in tree-local space.
    pub active_anchor: Vec3,
    pub time: f32,
    pub dt: Duration,
}

#[derive(Clone, Debug)]
pub struct PhotoWall {
    slots: Vec<PhotoSlot>,
    face_threshold: f32,
    position_ease: Smoothing,
    scale_ease: Smoothing,
    active_ease: Smoothing,
}

fn docked_scale(progress: f32) -> f32 {
    0.8 + progress * 2.5
}

impl PhotoWall {
    pub fn new(cone: Cone, face_threshold: f32, smoothing: Smoothing) -> Self {
        let slots = (0..PHOTO_SLOTS)
            .map(|i| {
                let (tree_position, look_at) = photo_surface_point(i, PHOTO_SLOTS, cone);
                PhotoSlot {
                    source: PhotoSource::Placeholder(i + 1),
                    tree_position,
                    look_at,
                    ring_position: ring_point(
                        i,
                        PHOTO_SLOTS,
                        PHOTO_RING_RADIUS_X,
                        PHOTO_RING_RADIUS_Y,
                        PHOTO_RING_DEPTH,
                    ),
                    pose: PanelPose {
                        position: tree_position,
                        scale: docked_scale(0.0),
                        facing: Facing::Toward(look_at),
                        mode: PanelMode::Docked,
                    },
                }
            })
            .collect();
        Self {
            slots,
            face_threshold,
            position_ease: smoothing.with_legacy_factor(0.08),
            scale_ease: smoothing.with_legacy_factor(0.05),
            active_ease: smoothing.with_legacy_factor(0.1),
        }
    }

    pub fn slots(&self) -> &[PhotoSlot] {
        &self.slots
    }

    /// Refill slot contents from the photo list; extra photos are ignored.
    pub fn assign(&mut self, photos: &[PhotoRef]) {
        if photos.len() > self.slots.len() {
            log::info!(
                "[photo] showing {} of {} photos",
                self.slots.len(),
                photos.len()
            );
        }
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.source = match photos.get(i) {
                Some(p) => PhotoSource::Image(p.clone()),
                None => PhotoSource::Placeholder(i + 1),
            };
        }
    }

    /// Ease every panel one frame toward the pose its mode asks for.
    pub fn update(&mut self, frame: &PanelFrame) {
        let p = frame.progress;
        let pos_f = self.position_ease.factor(frame.dt);
        let scale_f = self.scale_ease.factor(frame.dt);
        let active_f = self.active_ease.factor(frame.dt);
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let pose = &mut slot.pose;
            if frame.active == Some(i) {
                pose.mode = PanelMode::Active;
                pose.position = pose.position.lerp(frame.active_anchor, active_f);
                pose.scale = approach(pose.scale, PHOTO_ACTIVE_SCALE, active_f);
                pose.facing = Facing::Camera;
                continue;
            }
            pose.mode = PanelMode::Docked;
            let mut target = slot.tree_position.lerp(slot.ring_position, p);
            if p > PHOTO_FLOAT_THRESHOLD {
                target.y += (frame.time + i as f32).sin() * PHOTO_FLOAT_AMPLITUDE * p;
            }
            pose.position = pose.position.lerp(target, pos_f);
            pose.scale = approach(pose.scale, docked_scale(p), scale_f);
            pose.facing = if p < self.face_threshold {
                Facing::Toward(slot.look_at)
            } else {
                Facing::Camera
            };
        }
    }
}
