//! Keeps a playback output in step with the music toggle.

use crate::error::CoreError;

/// Anything that can start and stop the background track.
pub trait MusicOutput {
    /// Start or resume playback. May be refused (e.g. autoplay policy).
    fn play(&mut self) -> Result<(), CoreError>;
    fn pause(&mut self);
}

/// Mirrors `music_playing` onto a [`MusicOutput`]: play on the rising edge,
/// pause on the falling edge. A refused play is retried on the next user
/// interaction rather than every frame.
#[derive(Debug, Default)]
pub struct MusicSync {
    requested: bool,
    playing: bool,
    retry_pending: bool,
}

impl MusicSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the output is known to be playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn retry_pending(&self) -> bool {
        self.retry_pending
    }

    /// Call once per frame with the current toggle.
    pub fn sync<O: MusicOutput + ?Sized>(&mut self, wanted: bool, output: &mut O) {
        if wanted == self.requested {
            return;
        }
        self.requested = wanted;
        if wanted {
            self.try_play(output);
        } else {
            self.retry_pending = false;
            if self.playing {
                output.pause();
                self.playing = false;
            }
        }
    }

    /// Call from click/touch/key handlers; retries a refused play.
    pub fn on_user_interaction<O: MusicOutput + ?Sized>(&mut self, output: &mut O) {
        if self.retry_pending && self.requested {
            self.try_play(output);
        }
    }

    /// For outputs that learn about a refusal after `play` returned.
    pub fn report_refused(&mut self, reason: &str) {
        if self.requested {
            log::warn!("[music] playback refused: {reason}; will retry on next interaction");
            self.playing = false;
            self.retry_pending = true;
        }
    }

    fn try_play<O: MusicOutput + ?Sized>(&mut self, output: &mut O) {
        match output.play() {
            Ok(()) => {
                self.playing = true;
                self.retry_pending = false;
            }
            Err(e) => {
                log::warn!("[music] {e}; will retry on next interaction");
                self.playing = false;
                self.retry_pending = true;
            }
        }
    }
}
