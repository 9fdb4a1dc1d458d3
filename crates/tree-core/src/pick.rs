//! Ray picking against photo panels.

use crate::constants::PHOTO_PICK_RADIUS;
use crate::photo::PanelPose;
use glam::{Quat, Vec3};

/// Ray-sphere intersection. Returns distance along the ray if hit in front.
///
/// An origin inside the sphere hits at the exit point.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Index of the nearest panel hit by a world-space ray.
///
/// Panel poses are tree-local; `tree_rotation` maps them into world space.
pub fn pick_panel<'a, I>(ray_origin: Vec3, ray_dir: Vec3, tree_rotation: Quat, poses: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a PanelPose>,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, pose) in poses.into_iter().enumerate() {
        let center = tree_rotation * pose.position;
        if let Some(t) = ray_sphere(ray_origin, ray_dir, center, PHOTO_PICK_RADIUS * pose.scale) {
            match best {
                Some((_, bt)) if bt <= t => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
