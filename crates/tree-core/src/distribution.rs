//! Spatial layouts for the assembled and scattered states.
//!
//! Every function that draws from `rng` is meant to be called once per member
//! when a population is built; the results are stored and only blended
//! afterwards.

use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Tree silhouette used by the cone layouts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cone {
    pub height: f32,
    pub base_radius: f32,
}

impl Default for Cone {
    fn default() -> Self {
        Self {
            height: TREE_HEIGHT,
            base_radius: TREE_RADIUS,
        }
    }
}

impl Cone {
    #[inline]
    pub fn radius_at(&self, y: f32) -> f32 {
        cone_radius_at(y, self.height, self.base_radius)
    }

    /// Random height spanning the whole tree.
    #[inline]
    pub fn random_height<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen::<f32>() * self.height - self.height / 2.0
    }
}

/// Golden-angle packed point inside the cone volume.
///
/// Height runs linearly with `index` from `-height/2` (index 0) upward. The
/// radial sample uses `sqrt(u)` so the 30%..100% shell fills evenly by area.
pub fn cone_point<R: Rng + ?Sized>(index: usize, total: usize, cone: Cone, rng: &mut R) -> Vec3 {
    let ratio = index as f32 / total.max(1) as f32;
    let y = ratio * cone.height - cone.height / 2.0;
    let r_max = cone.radius_at(y);
    let theta = index as f32 * GOLDEN_ANGLE;
    let r = r_max * (0.3 + 0.7 * rng.gen::<f32>().sqrt());

    let jitter = Vec3::new(
        rng.gen::<f32>() - 0.5,
        rng.gen::<f32>() - 0.5,
        rng.gen::<f32>() - 0.5,
    ) * CONE_JITTER;
    Vec3::new(r * theta.cos(), y, r * theta.sin()) + jitter
}

/// Point at a random height and angle whose radius is a random fraction of
/// the cone radius in `[min_ratio, min_ratio + span)`.
pub fn cone_shell_point<R: Rng + ?Sized>(
    cone: Cone,
    min_ratio: f32,
    span: f32,
    rng: &mut R,
) -> Vec3 {
    let y = cone.random_height(rng);
    let r = cone.radius_at(y) * (min_ratio + rng.gen::<f32>() * span);
    let theta = rng.gen::<f32>() * TAU;
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

/// Uniform direction on the unit sphere.
///
/// `phi = acos(2v - 1)` keeps the density uniform; sampling phi directly would
/// bunch points at the poles.
pub fn unit_sphere_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}

/// Scatter target in the spherical shell `[base_radius, 3 * base_radius]`.
pub fn levitation_point<R: Rng + ?Sized>(base_radius: f32, rng: &mut R) -> Vec3 {
    let dir = unit_sphere_direction(rng);
    let min_r = base_radius;
    let max_r = base_radius * SCATTER_SHELL_SPAN;
    let distance = min_r + rng.gen::<f32>() * (max_r - min_r);
    dir * distance
}

/// Elliptical ring slot, starting at the top and pulled toward the viewer.
pub fn ring_point(index: usize, total: usize, radius_x: f32, radius_y: f32, depth: f32) -> Vec3 {
    let angle = (index as f32 / total.max(1) as f32) * TAU + FRAC_PI_2;
    Vec3::new(radius_x * angle.cos(), radius_y * angle.sin(), depth)
}

/// Uniform point in an axis-aligned cube of side `size` centered on the origin.
pub fn box_point<R: Rng + ?Sized>(size: f32, rng: &mut R) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * size,
        (rng.gen::<f32>() - 0.5) * size,
        (rng.gen::<f32>() - 0.5) * size,
    )
}

/// Point in a vertical cylindrical band around the trunk.
pub fn cylinder_point<R: Rng + ?Sized>(
    min_radius: f32,
    radius_span: f32,
    height: f32,
    rng: &mut R,
) -> Vec3 {
    let radius = min_radius + rng.gen::<f32>() * radius_span;
    let theta = rng.gen::<f32>() * TAU;
    let y = (rng.gen::<f32>() - 0.5) * height;
    Vec3::new(radius * theta.cos(), y, radius * theta.sin())
}

/// Docked slot of a photo on the tree surface, and the point it looks at.
///
/// Photos spread evenly from `0.3 * height` down to `-0.4 * height`, sit just
/// outside the cone and wind around it roughly three per turn.
pub fn photo_surface_point(index: usize, total: usize, cone: Cone) -> (Vec3, Vec3) {
    let start_y = cone.height * PHOTO_TOP_FRACTION;
    let end_y = -cone.height * PHOTO_BOTTOM_FRACTION;
    let ratio = index as f32 / (total.max(2) - 1) as f32;
    let y = start_y - ratio * (start_y - end_y);
    let surface_r = cone.radius_at(y) + PHOTO_SURFACE_OFFSET;
    let theta = index as f32 * (TAU / PHOTOS_PER_TURN);
    let x = surface_r * theta.cos();
    let z = surface_r * theta.sin();
    (Vec3::new(x, y, z), Vec3::new(x * 2.0, y, z * 2.0))
}
