//! Maps classifier output to interaction intents.
//!
//! Continuous gestures (open palm, closed fist, hand position) write straight
//! into [`InteractionState`]. Discrete gestures go through a small debounce
//! state machine per toggle: a toggle fires only on the frame the gesture is
//! entered, and only if its cooldown has elapsed.

use crate::constants::*;
use crate::error::{ClassifierError, CoreError};
use crate::state::InteractionState;
use instant::Instant;
use smallvec::SmallVec;
use std::time::Duration;

/// Closed set of labels the classifier reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Gesture {
    #[default]
    None,
    OpenPalm,
    ClosedFist,
    Victory,
    ThumbUp,
    /// A recognised hand whose gesture has no mapping here.
    Other,
}

impl Gesture {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Open_Palm" => Gesture::OpenPalm,
            "Closed_Fist" => Gesture::ClosedFist,
            "Victory" => Gesture::Victory,
            "Thumb_Up" => Gesture::ThumbUp,
            "None" | "" => Gesture::None,
            _ => Gesture::Other,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Gesture::None => "None",
            Gesture::OpenPalm => "Open_Palm",
            Gesture::ClosedFist => "Closed_Fist",
            Gesture::Victory => "Victory",
            Gesture::ThumbUp => "Thumb_Up",
            Gesture::Other => "Other",
        }
    }
}

/// One detected hand: gesture plus normalised wrist position (top-left origin).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReading {
    pub gesture: Gesture,
    pub x: f32,
    pub y: f32,
}

impl HandReading {
    /// Validate and clamp a raw reading; non-finite coordinates are rejected.
    pub fn new(gesture: Gesture, x: f32, y: f32) -> Result<Self, CoreError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(CoreError::MalformedReading { x, y });
        }
        Ok(Self {
            gesture,
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        })
    }

    pub fn from_label(label: &str, x: f32, y: f32) -> Result<Self, CoreError> {
        Self::new(Gesture::from_label(label), x, y)
    }
}

/// Result of one classifier pass: zero or one hand, or a failure.
pub type Classification = Result<Option<HandReading>, ClassifierError>;

/// Discrete toggles driven by gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Decorations,
    Music,
}

/// Edge + cooldown debounce for one toggle.
#[derive(Clone, Debug)]
pub struct ToggleDebounce {
    trigger: Gesture,
    cooldown: Duration,
    last_gesture: Gesture,
    last_fired_at: Option<Instant>,
}

impl ToggleDebounce {
    pub fn new(trigger: Gesture, cooldown: Duration) -> Self {
        Self {
            trigger,
            cooldown,
            last_gesture: Gesture::None,
            last_fired_at: None,
        }
    }

    /// Feed this frame's gesture; returns true when the toggle fires.
    pub fn observe(&mut self, gesture: Gesture, now: Instant) -> bool {
        let entered = gesture == self.trigger && self.last_gesture != self.trigger;
        let cooled = match self.last_fired_at {
            Some(at) => now.saturating_duration_since(at) > self.cooldown,
            None => true,
        };
        self.last_gesture = gesture;
        if entered && cooled {
            self.last_fired_at = Some(now);
            true
        } else {
            false
        }
    }
}

/// What one adapter step did, for logging and tests.
pub type FiredToggles = SmallVec<[Toggle; 2]>;

/// Turns classifier output into [`InteractionState`] writes.
#[derive(Clone, Debug)]
pub struct GestureAdapter {
    decorations: ToggleDebounce,
    music: ToggleDebounce,
    /// Last successful classification; `None` until the first one arrives.
    last: Option<Option<HandReading>>,
}

impl Default for GestureAdapter {
    fn default() -> Self {
        Self::new(Duration::from_millis(TOGGLE_COOLDOWN_MS))
    }
}

/// Three-zone rotation control from the horizontal hand position.
#[inline]
pub fn rotation_for_hand_x(x: f32) -> f32 {
    if x < ROTATION_LEFT_ZONE {
        -ROTATION_SPEED
    } else if x > ROTATION_RIGHT_ZONE {
        ROTATION_SPEED
    } else {
        0.0
    }
}

impl GestureAdapter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            decorations: ToggleDebounce::new(Gesture::Victory, cooldown),
            music: ToggleDebounce::new(Gesture::ThumbUp, cooldown),
            last: None,
        }
    }

    /// Apply one frame's reading (`None` = no hand in view).
    pub fn apply(
        &mut self,
        reading: Option<HandReading>,
        now: Instant,
        state: &mut InteractionState,
    ) -> FiredToggles {
        let mut fired = FiredToggles::new();
        let Some(hand) = reading else {
            state.set_hand_status(false, Gesture::None);
            state.set_rotation_velocity(0.0);
            self.decorations.observe(Gesture::None, now);
            self.music.observe(Gesture::None, now);
            return fired;
        };

        state.set_hand_status(true, hand.gesture);
        match hand.gesture {
            Gesture::OpenPalm => state.nudge_progress(GESTURE_PROGRESS_STEP),
            Gesture::ClosedFist => state.nudge_progress(-GESTURE_PROGRESS_STEP),
            _ => {}
        }
        if self.decorations.observe(hand.gesture, now) {
            state.toggle_decorations();
            fired.push(Toggle::Decorations);
        }
        if self.music.observe(hand.gesture, now) {
            state.toggle_music();
            fired.push(Toggle::Music);
        }

        state.set_rotation_velocity(rotation_for_hand_x(hand.x));
        state.set_camera_vertical_target(hand.y);

        for t in &fired {
            log::info!("[gesture] {:?} toggled by {}", t, hand.gesture.as_label());
        }
        fired
    }

    /// Apply a classifier result; failures are logged and leave state untouched.
    pub fn ingest(
        &mut self,
        classification: Classification,
        now: Instant,
        state: &mut InteractionState,
    ) -> FiredToggles {
        match classification {
            Ok(reading) => {
                self.last = Some(reading);
                self.apply(reading, now, state)
            }
            Err(e) => {
                log::warn!("[gesture] skipping frame: {e}");
                FiredToggles::new()
            }
        }
    }

    /// One render tick. A fresh classification is ingested; without one the
    /// last successful reading is applied again, so a held gesture keeps
    /// stepping at the render rate. Toggles do not refire on a repeat.
    pub fn tick(
        &mut self,
        fresh: Option<Classification>,
        now: Instant,
        state: &mut InteractionState,
    ) -> FiredToggles {
        match (fresh, self.last) {
            (Some(classification), _) => self.ingest(classification, now, state),
            (None, Some(reading)) => self.apply(reading, now, state),
            (None, None) => FiredToggles::new(),
        }
    }

    /// Drop the remembered reading, e.g. once capture has stopped.
    pub fn forget(&mut self) {
        self.last = None;
    }
}
