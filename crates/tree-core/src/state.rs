//! Interaction state shared by the renderer, manual controls and the
//! gesture adapter.
//!
//! The store is an owned value passed by reference to whoever needs it. All
//! writes go through the setters below, which clamp or validate so readers
//! never see an out-of-range value.

use crate::constants::{DEFAULT_CAMERA_VERTICAL_TARGET, PHOTO_SLOTS};
use crate::error::CoreError;
use crate::gesture::Gesture;
use crate::progress::Progress;

/// Reference to a user image (object URL, file path, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhotoRef(pub String);

impl From<&str> for PhotoRef {
    fn from(s: &str) -> Self {
        PhotoRef(s.to_string())
    }
}

impl From<String> for PhotoRef {
    fn from(s: String) -> Self {
        PhotoRef(s)
    }
}

#[derive(Clone, Debug)]
pub struct InteractionState {
    progress: Progress,
    rotation_velocity: f32,
    camera_vertical_target: f32,
    decorations_visible: bool,
    music_playing: bool,
    hand_detected: bool,
    current_gesture: Gesture,
    photos: Vec<PhotoRef>,
    active_photo: Option<usize>,
    // bumped whenever the photo list changes so consumers can resync
    photos_revision: u64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            progress: Progress::default(),
            rotation_velocity: 0.0,
            camera_vertical_target: DEFAULT_CAMERA_VERTICAL_TARGET,
            decorations_visible: true,
            // off until the user asks for it (autoplay policies)
            music_playing: false,
            hand_detected: false,
            current_gesture: Gesture::None,
            photos: Vec::new(),
            active_photo: None,
            photos_revision: 0,
        }
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------- Readers ----------------

    pub fn progress(&self) -> f32 {
        self.progress.get()
    }
    pub fn rotation_velocity(&self) -> f32 {
        self.rotation_velocity
    }
    pub fn camera_vertical_target(&self) -> f32 {
        self.camera_vertical_target
    }
    pub fn decorations_visible(&self) -> bool {
        self.decorations_visible
    }
    pub fn music_playing(&self) -> bool {
        self.music_playing
    }
    pub fn hand_detected(&self) -> bool {
        self.hand_detected
    }
    pub fn current_gesture(&self) -> Gesture {
        self.current_gesture
    }
    pub fn photos(&self) -> &[PhotoRef] {
        &self.photos
    }
    pub fn photos_revision(&self) -> u64 {
        self.photos_revision
    }
    pub fn active_photo(&self) -> Option<usize> {
        self.active_photo
    }

    // ---------------- Setters ----------------

    pub fn set_progress(&mut self, value: f32) {
        self.progress.set(value);
    }

    pub fn nudge_progress(&mut self, delta: f32) {
        self.progress.nudge(delta);
    }

    pub fn set_rotation_velocity(&mut self, velocity: f32) {
        self.rotation_velocity = if velocity.is_finite() { velocity } else { 0.0 };
    }

    pub fn set_camera_vertical_target(&mut self, target: f32) {
        if target.is_finite() {
            self.camera_vertical_target = target.clamp(0.0, 1.0);
        }
    }

    pub fn set_hand_status(&mut self, detected: bool, gesture: Gesture) {
        self.hand_detected = detected;
        self.current_gesture = gesture;
    }

    pub fn toggle_decorations(&mut self) {
        self.decorations_visible = !self.decorations_visible;
    }

    pub fn toggle_music(&mut self) {
        self.music_playing = !self.music_playing;
    }

    /// Append photos in order. An empty batch is a no-op.
    pub fn add_photos<I>(&mut self, photos: I)
    where
        I: IntoIterator,
        I::Item: Into<PhotoRef>,
    {
        let before = self.photos.len();
        self.photos.extend(photos.into_iter().map(Into::into));
        if self.photos.len() != before {
            self.photos_revision += 1;
            log::info!("[state] photos: {}", self.photos.len());
        }
    }

    /// Set or clear the zoomed photo directly.
    pub fn set_active_photo(&mut self, index: Option<usize>) -> Result<(), CoreError> {
        if let Some(i) = index {
            check_slot(i)?;
        }
        self.active_photo = index;
        Ok(())
    }

    /// Selection action on a photo slot: activates it, or docks it again if it
    /// was already the active one. At most one slot is active.
    pub fn select_photo(&mut self, index: usize) -> Result<Option<usize>, CoreError> {
        check_slot(index)?;
        self.active_photo = match self.active_photo {
            Some(active) if active == index => None,
            _ => Some(index),
        };
        Ok(self.active_photo)
    }
}

fn check_slot(index: usize) -> Result<(), CoreError> {
    if index < PHOTO_SLOTS {
        Ok(())
    } else {
        Err(CoreError::PhotoIndexOutOfRange {
            index,
            slots: PHOTO_SLOTS,
        })
    }
}
