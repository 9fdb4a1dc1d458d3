use glam::Vec3;

// Shared tuning constants used by both web and native frontends.

// Tree silhouette
pub const TREE_HEIGHT: f32 = 14.0; // apex to base
pub const TREE_RADIUS: f32 = 5.0; // cone radius at the base
pub const GOLDEN_ANGLE: f32 = 2.39996; // radians between consecutive needles
pub const CONE_JITTER: f32 = 0.2; // full width of the organic jitter box

// Population sizes
pub const NEEDLE_COUNT: usize = 12_000;
pub const BULB_COUNT: usize = 250;
pub const LIGHT_COUNT: usize = 1_000;
pub const GIFT_COUNT: usize = 80;
pub const ORB_COUNT: usize = 350;
pub const CINEMATIC_COUNT: usize = 450;
pub const SNOW_COUNT: usize = 5_000;
pub const DUST_COUNT: usize = 400;
pub const GLOW_COUNT: usize = 300;

// Scatter shells (inner radius, outer is 3x)
pub const NEEDLE_SCATTER_RADIUS: f32 = 20.0;
pub const BULB_SCATTER_RADIUS: f32 = 22.0;
pub const LIGHT_SCATTER_RADIUS: f32 = 25.0; // divided by member weight
pub const GIFT_SCATTER_RADIUS: f32 = 25.0;
pub const ORB_SCATTER_RADIUS: f32 = 28.0;
pub const CINEMATIC_SCATTER_RADIUS: f32 = 30.0;
pub const SCATTER_SHELL_SPAN: f32 = 3.0;

// Ambient volumes
pub const AMBIENT_BOX_SIZE: f32 = 35.0; // snow and dust fill a cube of this side
pub const SNOW_COLUMN_HEIGHT: f32 = 25.0; // wrap height of the endless fall
pub const GLOW_RADIUS_MIN: f32 = 2.0;
pub const GLOW_RADIUS_SPAN: f32 = 6.0;
pub const GLOW_HEIGHT: f32 = 16.0;

// Progress
pub const LEGACY_SMOOTHING_FACTOR: f32 = 0.05; // per-frame lerp factor
pub const REFERENCE_FRAME_RATE: f32 = 60.0; // rate the legacy factor was tuned at
pub const WIND_GAIN: f32 = 20.0; // rotation velocity -> wind strength

// Motion
pub const TURBULENCE_SPATIAL_SCALE: f32 = 0.5;
pub const TURBULENCE_TIME_SCALE: f32 = 0.5;
pub const FLOAT_PROGRESS_THRESHOLD: f32 = 0.1; // no float below this progress
pub const SCALE_PULSE_RATE: f32 = 3.0;
pub const SCALE_PULSE_DEPTH: f32 = 0.05;

// Gesture mapping
pub const GESTURE_PROGRESS_STEP: f32 = 0.02;
pub const ROTATION_SPEED: f32 = 0.3;
pub const ROTATION_LEFT_ZONE: f32 = 0.3; // hand x below this rotates left
pub const ROTATION_RIGHT_ZONE: f32 = 0.7; // hand x above this rotates right
pub const TOGGLE_COOLDOWN_MS: u64 = 1_000;
pub const IDLE_ROTATION_SPEED: f32 = 0.05;

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 2.0, 35.0];
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_POLAR_MIN: f32 = std::f32::consts::PI / 3.5;
pub const CAMERA_POLAR_MAX: f32 = std::f32::consts::FRAC_PI_2;
pub const CAMERA_POLAR_EASE: f32 = 0.03;
pub const DEFAULT_CAMERA_VERTICAL_TARGET: f32 = 0.5;

// Photo wall
pub const PHOTO_SLOTS: usize = 14;
pub const PHOTO_TOP_FRACTION: f32 = 0.3; // of tree height, above center
pub const PHOTO_BOTTOM_FRACTION: f32 = 0.4; // of tree height, below center
pub const PHOTO_SURFACE_OFFSET: f32 = 0.5;
pub const PHOTOS_PER_TURN: f32 = 3.5;
pub const PHOTO_RING_RADIUS_X: f32 = 18.0;
pub const PHOTO_RING_RADIUS_Y: f32 = 10.0;
pub const PHOTO_RING_DEPTH: f32 = 8.0;
pub const PHOTO_FACE_CAMERA_THRESHOLD: f32 = 0.6;
pub const PHOTO_FLOAT_THRESHOLD: f32 = 0.05;
pub const PHOTO_FLOAT_AMPLITUDE: f32 = 0.05;
pub const PHOTO_ACTIVE_DISTANCE: f32 = 5.0; // in front of the camera
pub const PHOTO_ACTIVE_SCALE: f32 = 2.0;
pub const PHOTO_PICK_RADIUS: f32 = 0.8; // bounding sphere at scale 1

// Star
pub const STAR_LIFT: f32 = 0.8; // above the apex
pub const STAR_SPIN_RATE: f32 = 0.5;

// Palettes (linear RGB)
pub const NEEDLE_COLOR_START: [f32; 3] = [0.012, 0.310, 0.114]; // deep emerald
pub const NEEDLE_COLOR_END: [f32; 3] = [0.831, 0.686, 0.216]; // gold
pub const RED: [f32; 3] = [1.0, 0.0, 0.0];
pub const GOLD: [f32; 3] = [1.0, 0.843, 0.0];
pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
pub const METALLIC_GOLD: [f32; 3] = [0.831, 0.686, 0.216];
pub const DARK_RED: [f32; 3] = [0.545, 0.0, 0.0];
pub const EMERALD: [f32; 3] = [0.008, 0.176, 0.212];
pub const WARM_LIGHTS: [[f32; 3]; 4] = [
    [1.0, 0.980, 0.804], // lemon chiffon
    [1.0, 0.843, 0.0],   // gold
    [0.980, 0.980, 0.824],
    [1.0, 1.0, 1.0],
];
pub const SNOW_COLOR: [f32; 3] = [1.0, 0.980, 0.941];
pub const DUST_COLOR: [f32; 3] = [0.831, 0.686, 0.216];
pub const GLOW_COLOR: [f32; 3] = [1.0, 0.859, 0.439];

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::from(CAMERA_EYE)
}

/// Cone radius at height `y` for a tree centered on the origin.
#[inline]
pub fn cone_radius_at(y: f32, height: f32, base_radius: f32) -> f32 {
    ((height / 2.0 - y) / height) * base_radius
}
