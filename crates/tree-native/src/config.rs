use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tree_core::SceneParams;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Simulated frame rate.
    pub fps: f32,
    /// Frames to run after the script ends, so display values can settle.
    pub settle_frames: u32,
    /// Log a state summary every N frames (0 disables).
    pub log_every: u32,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            fps: 60.0,
            settle_frames: 120,
            log_every: 30,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub scene: SceneParams,
    pub replay: ReplaySettings,
}

impl ReplayConfig {
    /// Read `path` if it exists; fall back to defaults on any problem.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if !path_obj.exists() {
            log::info!("no config at {path}, using defaults");
            return Self::default();
        }
        match fs::read_to_string(path_obj) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    log::warn!("failed to parse config {path}: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("failed to read config {path}: {err}. Using defaults.");
                Self::default()
            }
        }
    }
}
