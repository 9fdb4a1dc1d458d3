//! Authoritative progress and the display-side smoothing every renderer uses.

use crate::constants::{LEGACY_SMOOTHING_FACTOR, REFERENCE_FRAME_RATE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Clamp a progress write into `[0, 1]`. NaN maps to 0.
#[inline]
pub fn clamp_progress(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Authoritative progress value. 0 = assembled tree, 1 = fully scattered.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Progress(f32);

impl Progress {
    pub fn new(value: f32) -> Self {
        Self(clamp_progress(value))
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    pub fn set(&mut self, value: f32) {
        self.0 = clamp_progress(value);
    }

    pub fn nudge(&mut self, delta: f32) {
        self.set(self.0 + delta);
    }
}

/// How display values chase their targets each frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum Smoothing {
    /// Fixed lerp factor per frame; convergence speed depends on frame rate.
    Legacy { factor: f32 },
    /// `factor = 1 - exp(-rate * dt)`; independent of frame rate.
    TimeBased { rate: f32 },
}

impl Smoothing {
    /// Time-based rate that behaves like `factor` at the reference frame rate.
    pub fn matching_legacy(factor: f32) -> Self {
        let rate = -(1.0 - factor.clamp(0.0, 0.999_999)).ln() * REFERENCE_FRAME_RATE;
        Smoothing::TimeBased { rate }
    }

    /// Lerp factor for a frame of length `dt`, always within `[0, 1]`.
    pub fn factor(self, dt: Duration) -> f32 {
        match self {
            Smoothing::Legacy { factor } => factor.clamp(0.0, 1.0),
            Smoothing::TimeBased { rate } => {
                (1.0 - (-rate.max(0.0) * dt.as_secs_f32()).exp()).clamp(0.0, 1.0)
            }
        }
    }

    /// Same easing with a different legacy factor (camera, photos, wind).
    pub fn with_legacy_factor(self, factor: f32) -> Self {
        match self {
            Smoothing::Legacy { .. } => Smoothing::Legacy { factor },
            Smoothing::TimeBased { .. } => Smoothing::matching_legacy(factor),
        }
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::matching_legacy(LEGACY_SMOOTHING_FACTOR)
    }
}

/// One exponential-approach step. Never overshoots for `factor` in `[0, 1]`.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Display-side progress lagging behind the authoritative value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedProgress {
    value: f32,
    smoothing: Smoothing,
}

impl SmoothedProgress {
    pub fn new(smoothing: Smoothing) -> Self {
        Self {
            value: 0.0,
            smoothing,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Advance one frame toward `target` and return the new display value.
    pub fn step(&mut self, target: f32, dt: Duration) -> f32 {
        let target = clamp_progress(target);
        self.value = approach(self.value, target, self.smoothing.factor(dt));
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
