//! Error types for the tree core.
//!
//! Most setters clamp instead of failing; the variants here cover the inputs
//! that cannot be clamped into something meaningful.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("photo index {index} is out of range (slots: {slots})")]
    PhotoIndexOutOfRange { index: usize, slots: usize },
    #[error("hand reading has a non-finite coordinate ({x}, {y})")]
    MalformedReading { x: f32, y: f32 },
    #[error("playback refused: {0}")]
    PlaybackRefused(String),
}

/// Failures reported by the external gesture classifier or its capture device.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("classifier failed to initialize: {0}")]
    Init(String),
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("classification failed: {0}")]
    Frame(String),
    #[error("malformed classifier result: {0}")]
    Malformed(String),
}

impl From<CoreError> for ClassifierError {
    fn from(e: CoreError) -> Self {
        ClassifierError::Malformed(e.to_string())
    }
}
