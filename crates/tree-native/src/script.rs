//! Scripted stand-in for the webcam classifier.

use anyhow::{Context, Result};
use instant::Instant;
use serde::Deserialize;
use std::fs;
use std::thread;
use std::time::Duration;
use tree_core::{
    CancelToken, CaptureDevice, Classification, ClassifierError, HandClassifier, HandReading,
    ResultSlot,
};

/// One script entry: the same classifier output for `frames` frames.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Step {
    /// Classifier label; `"none"` means no hand in view.
    pub gesture: String,
    #[serde(default = "one")]
    pub frames: u32,
    #[serde(default = "center")]
    pub hand_x: f32,
    #[serde(default = "center")]
    pub hand_y: f32,
    /// Report a classification failure instead of a reading.
    #[serde(default)]
    pub error: Option<String>,
}

fn one() -> u32 {
    1
}

fn center() -> f32 {
    0.5
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

const DEFAULT_SCRIPT: &str = r#"
[[step]]
gesture = "Open_Palm"
frames = 25

[[step]]
gesture = "none"
frames = 30

[[step]]
gesture = "Victory"
frames = 5
hand_x = 0.85

[[step]]
gesture = "none"
frames = 70

[[step]]
gesture = "Thumb_Up"
frames = 10
hand_x = 0.1
hand_y = 0.2

[[step]]
gesture = "Other"
frames = 1
error = "landmarks missing"

[[step]]
gesture = "Closed_Fist"
frames = 30
"#;

impl Script {
    pub fn builtin() -> Result<Self> {
        toml::from_str(DEFAULT_SCRIPT).context("parsing built-in script")
    }

    pub fn load(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading script {path}"))?;
        toml::from_str(&text).with_context(|| format!("parsing script {path}"))
    }

    pub fn total_frames(&self) -> u32 {
        self.steps.iter().map(|s| s.frames).sum()
    }
}

/// Replays a [`Script`] one classification per call.
pub struct ScriptedClassifier {
    steps: Vec<Step>,
    step: usize,
    emitted: u32,
}

impl ScriptedClassifier {
    pub fn new(script: Script) -> Self {
        Self {
            steps: script.steps,
            step: 0,
            emitted: 0,
        }
    }

    pub fn finished(&self) -> bool {
        self.step >= self.steps.len()
    }
}

impl HandClassifier for ScriptedClassifier {
    fn classify(&mut self, _now: Instant) -> Classification {
        while let Some(step) = self.steps.get(self.step) {
            if self.emitted < step.frames {
                break;
            }
            self.step += 1;
            self.emitted = 0;
        }
        let Some(step) = self.steps.get(self.step) else {
            return Ok(None);
        };
        self.emitted += 1;
        if let Some(msg) = &step.error {
            return Err(ClassifierError::Frame(msg.clone()));
        }
        if step.gesture.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        Ok(Some(HandReading::from_label(
            &step.gesture,
            step.hand_x,
            step.hand_y,
        )?))
    }
}

/// Pretend capture device so the session exercises its release path.
#[derive(Debug, Default)]
pub struct ScriptCamera;

impl CaptureDevice for ScriptCamera {
    fn release(&mut self) {
        log::debug!("script camera closed");
    }
}

/// Run the classifier on its own thread, publishing into `slot` at `interval`
/// until the script ends or `cancel` is set.
pub fn spawn_classifier(
    mut classifier: ScriptedClassifier,
    slot: ResultSlot,
    cancel: CancelToken,
    interval: Duration,
) -> Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("gesture-classifier".into())
        .spawn(move || {
            while !cancel.is_cancelled() && !classifier.finished() {
                slot.publish(classifier.classify(Instant::now()));
                thread::sleep(interval);
            }
            log::info!("classifier loop stopped");
        })
        .context("spawning classifier thread")
}
