//! Per-frame motion evaluation shared by every population.
//!
//! The evaluator is stateless: everything it needs is the member's static
//! attributes plus the frame inputs (time, display progress, wind).

use crate::constants::*;
use crate::noise::simplex3;
use crate::population::{BlinkClass, Member, MorphProfile, MotionRule, Population, Shade};
use glam::{Quat, Vec3};

/// One rendered instance, laid out for direct upload to a vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub pos: [f32; 3],
    pub scale: f32,
    /// Linear RGB premultiplied by brightness, alpha in `w`.
    pub color: [f32; 4],
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInputs {
    /// Seconds since the scene started.
    pub time: f32,
    /// Smoothed progress of the population being evaluated.
    pub progress: f32,
    /// Smoothed wind derived from rotation velocity.
    pub wind: f32,
}

/// Brightness multiplier of a blink class at time `t`.
pub fn blink_brightness(blink: BlinkClass, t: f32, phase: f32) -> f32 {
    match blink {
        BlinkClass::Solid => 1.0,
        BlinkClass::Steady => 0.9 + (t * 1.5 + phase).sin() * 0.1,
        BlinkClass::Pulse => {
            let breath = 0.5 + (t * 2.0 + phase).sin() * 0.5;
            0.4 + breath * 0.8
        }
        BlinkClass::Twinkle => {
            if (t * 8.0 + phase).sin() > 0.0 {
                1.5
            } else {
                0.2
            }
        }
        BlinkClass::Flash => {
            if (t * 15.0 + phase).sin() > 0.5 {
                2.5
            } else {
                0.5
            }
        }
        BlinkClass::Glint => {
            let blink = (t * 4.0 + phase).sin() * 0.5 + 0.5;
            0.8 + 2.0 * blink
        }
    }
}

/// GLSL-style smoothstep; also valid with `edge0 > edge1`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Blended position of a morphing member including turbulence and float.
pub fn morph_position(member: &Member, profile: &MorphProfile, inputs: &FrameInputs) -> Vec3 {
    let p = inputs.progress;
    let t = inputs.time;
    let mut pos = member.assembled.lerp(member.scattered, p);

    if profile.turbulence > 0.0 && p > 0.0 {
        let n = simplex3(Vec3::new(
            pos.x * TURBULENCE_SPATIAL_SCALE,
            pos.y * TURBULENCE_SPATIAL_SCALE,
            t * TURBULENCE_TIME_SCALE,
        ));
        pos += Vec3::splat(n * p * profile.turbulence);
    }

    if profile.float_amplitude > 0.0 && p > FLOAT_PROGRESS_THRESHOLD {
        // heavier members float less
        let amplitude = profile.float_amplitude / member.attrs.weight.max(1e-3);
        pos.y += (t + member.attrs.phase).sin() * amplitude * p;
    }
    pos
}

fn evaluate_morph(member: &Member, profile: &MorphProfile, inputs: &FrameInputs) -> InstanceData {
    let t = inputs.time;
    let attrs = &member.attrs;
    let pos = morph_position(member, profile, inputs);

    let rgb = match profile.shade {
        Shade::Member => attrs.color * blink_brightness(attrs.blink, t, attrs.phase),
        Shade::Sparkle { from, to } => {
            let sparkle = (t * 5.0 + attrs.phase * 10.0).sin() * 0.5 + 0.5;
            from.lerp(to, sparkle)
        }
    };
    let alpha = 1.0 - inputs.progress * profile.alpha_fade;

    let scale = if profile.scale_pulse {
        attrs.size * (1.0 + (t * SCALE_PULSE_RATE + attrs.phase).sin() * SCALE_PULSE_DEPTH)
    } else {
        attrs.size
    };

    InstanceData {
        pos: pos.to_array(),
        scale,
        color: rgb.extend(alpha).to_array(),
    }
}

fn evaluate_snow(member: &Member, inputs: &FrameInputs) -> InstanceData {
    let t = inputs.time;
    let wind = inputs.wind;
    let half = SNOW_COLUMN_HEIGHT / 2.0;
    let mut pos = member.assembled;

    // endless fall wrapped over the column
    pos.y = half - (t * member.attrs.speed + (half - pos.y)).rem_euclid(SNOW_COLUMN_HEIGHT);
    pos.x += pos.y * wind * 0.5;
    pos.z += (t + pos.y).sin() * wind * 0.2;

    if wind.abs() > 0.1 {
        let angle = wind * t * 0.5;
        let (s, c) = angle.sin_cos();
        let (x, z) = (pos.x * c - pos.z * s, pos.x * s + pos.z * c);
        pos.x = x;
        pos.z = z;
    }

    let alpha = 0.6 * smoothstep(12.0, 8.0, pos.y.abs());
    InstanceData {
        pos: pos.to_array(),
        scale: member.attrs.size,
        color: member.attrs.color.extend(alpha).to_array(),
    }
}

fn evaluate_drift(member: &Member, inputs: &FrameInputs) -> InstanceData {
    let t = inputs.time * 0.15;
    let mut pos = member.assembled;
    pos.x += (t + pos.y * 0.5).sin() * 0.3;
    pos.y += (t + pos.x * 0.5).cos() * 0.3;
    pos.z += (t + pos.z * 0.5).sin() * 0.3;

    let alpha = 0.3 + 0.3 * (inputs.time + pos.x * 100.0).sin();
    InstanceData {
        pos: pos.to_array(),
        scale: member.attrs.size,
        color: member.attrs.color.extend(alpha).to_array(),
    }
}

fn evaluate_hover(member: &Member, inputs: &FrameInputs) -> InstanceData {
    let t = inputs.time * 0.3;
    let d = member.attrs.drift;
    let pos = member.assembled
        + Vec3::new((t + d.y).sin(), (t + d.x).cos(), (t + d.z).sin()) * 0.4;

    let alpha = 0.4 + 0.4 * (inputs.time * 1.5 + d.x * 10.0).sin();
    InstanceData {
        pos: pos.to_array(),
        scale: member.attrs.size,
        color: member.attrs.color.extend(alpha).to_array(),
    }
}

/// Evaluate a single member under `rule`.
pub fn evaluate_member(member: &Member, rule: &MotionRule, inputs: &FrameInputs) -> InstanceData {
    match rule {
        MotionRule::Morph(profile) => evaluate_morph(member, profile, inputs),
        MotionRule::Snowfall => evaluate_snow(member, inputs),
        MotionRule::Drift => evaluate_drift(member, inputs),
        MotionRule::Hover => evaluate_hover(member, inputs),
    }
}

/// Evaluate a whole population into `out`, replacing its contents.
pub fn evaluate_into(population: &Population, inputs: &FrameInputs, out: &mut Vec<InstanceData>) {
    let rule = population.rule();
    out.clear();
    out.reserve(population.len());
    out.extend(
        population
            .members()
            .iter()
            .map(|m| evaluate_member(m, &rule, inputs)),
    );
}

/// Rotation applied to the tree group, as a quaternion about +Y.
#[inline]
pub fn tree_rotation(angle: f32) -> Quat {
    Quat::from_rotation_y(angle)
}
