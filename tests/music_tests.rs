// Music toggle mirrored onto a playback output, including refused starts.

use tree_core::{CoreError, InteractionState, MusicOutput, MusicSync};

#[derive(Default)]
struct FakeTrack {
    refuse_next: bool,
    plays: u32,
    pauses: u32,
}

impl MusicOutput for FakeTrack {
    fn play(&mut self) -> Result<(), CoreError> {
        self.plays += 1;
        if std::mem::take(&mut self.refuse_next) {
            return Err(CoreError::PlaybackRefused("autoplay blocked".into()));
        }
        Ok(())
    }
    fn pause(&mut self) {
        self.pauses += 1;
    }
}

#[test]
fn starts_paused() {
    let state = InteractionState::new();
    assert!(!state.music_playing());
    let mut sync = MusicSync::new();
    let mut track = FakeTrack::default();
    sync.sync(state.music_playing(), &mut track);
    assert_eq!((track.plays, track.pauses), (0, 0));
}

#[test]
fn follows_edges_only() {
    let mut sync = MusicSync::new();
    let mut track = FakeTrack::default();
    for _ in 0..5 {
        sync.sync(true, &mut track);
    }
    assert_eq!(track.plays, 1);
    assert!(sync.is_playing());
    for _ in 0..5 {
        sync.sync(false, &mut track);
    }
    assert_eq!(track.pauses, 1);
    assert!(!sync.is_playing());
}

#[test]
fn refused_play_retries_on_interaction() {
    let mut sync = MusicSync::new();
    let mut track = FakeTrack {
        refuse_next: true,
        ..FakeTrack::default()
    };
    sync.sync(true, &mut track);
    assert!(!sync.is_playing());
    assert!(sync.retry_pending());

    // no retry storm while frames tick
    sync.sync(true, &mut track);
    assert_eq!(track.plays, 1);

    sync.on_user_interaction(&mut track);
    assert_eq!(track.plays, 2);
    assert!(sync.is_playing());
    assert!(!sync.retry_pending());
}

#[test]
fn late_refusal_is_retried() {
    let mut sync = MusicSync::new();
    let mut track = FakeTrack::default();
    sync.sync(true, &mut track);
    sync.report_refused("NotAllowedError");
    assert!(sync.retry_pending());
    sync.on_user_interaction(&mut track);
    assert_eq!(track.plays, 2);
    assert!(sync.is_playing());
}

#[test]
fn turning_off_cancels_a_pending_retry() {
    let mut sync = MusicSync::new();
    let mut track = FakeTrack {
        refuse_next: true,
        ..FakeTrack::default()
    };
    sync.sync(true, &mut track);
    sync.sync(false, &mut track);
    assert!(!sync.retry_pending());
    assert_eq!(track.pauses, 0);
    sync.on_user_interaction(&mut track);
    assert_eq!(track.plays, 1);
}
