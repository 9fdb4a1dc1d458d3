//! Camera description and the orbit rig that follows the vertical target.

use crate::constants::*;
use crate::progress::{approach, Smoothing};
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::time::Duration;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_eye_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: 0.1,
            zfar: 200.0,
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// World-space ray through a point given in normalized device coordinates.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn ndc_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (self.eye, (p1 - self.eye).normalize_or_zero())
    }

    /// World-space ray from pixel coordinates on a `width` x `height` surface.
    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        self.ndc_ray(Vec2::new(ndc_x, ndc_y))
    }
}

/// Orbit rig around the origin. The polar angle (from +Y) follows the
/// vertical target when `follow_vertical` is set, and is held horizontal
/// otherwise.
#[derive(Clone, Debug)]
pub struct CameraRig {
    camera: Camera,
    radius: f32,
    azimuth: f32,
    polar: f32,
    follow_vertical: bool,
    smoothing: Smoothing,
}

/// Polar angle for a vertical target in `[0, 1]`.
#[inline]
pub fn polar_for_target(target: f32) -> f32 {
    CAMERA_POLAR_MIN + target.clamp(0.0, 1.0) * (CAMERA_POLAR_MAX - CAMERA_POLAR_MIN)
}

impl CameraRig {
    pub fn new(aspect: f32, follow_vertical: bool, smoothing: Smoothing) -> Self {
        let eye = camera_eye_vec3();
        let radius = eye.length();
        let azimuth = eye.x.atan2(eye.z);
        let polar = if follow_vertical {
            (eye.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            CAMERA_POLAR_MAX
        };
        let mut rig = Self {
            camera: Camera {
                aspect,
                ..Camera::default()
            },
            radius,
            azimuth,
            polar,
            follow_vertical,
            smoothing: smoothing.with_legacy_factor(CAMERA_POLAR_EASE),
        };
        rig.place_eye();
        rig
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn polar_angle(&self) -> f32 {
        self.polar
    }

    pub fn follows_vertical(&self) -> bool {
        self.follow_vertical
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    /// Ease the polar angle toward the vertical target.
    pub fn update(&mut self, vertical_target: f32, dt: Duration) {
        if !self.follow_vertical {
            return;
        }
        let target = polar_for_target(vertical_target);
        self.polar = approach(self.polar, target, self.smoothing.factor(dt))
            .clamp(CAMERA_POLAR_MIN, CAMERA_POLAR_MAX);
        self.place_eye();
    }

    fn place_eye(&mut self) {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.camera.eye = self.camera.target + Vec3::new(sp * sa, cp, sp * ca) * self.radius;
    }
}
