mod config;
mod script;

use anyhow::Result;
use clap::Parser;
use glam::{Mat4, Vec3};
use instant::Instant;
use std::time::Duration;

use config::ReplayConfig;
use script::{spawn_classifier, Script, ScriptCamera, ScriptedClassifier};
use tree_core::{
    CoreError, GestureAdapter, GestureSession, HandClassifier, InstanceData, InteractionState,
    MusicOutput, MusicSync, PhotoSlot, PopulationKind, RenderSink, Shape, Smoothing, StarPose,
    TreeScene,
};
use tree_core::constants::LEGACY_SMOOTHING_FACTOR;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "tree-replay.toml")]
    config: String,

    /// Gesture script (TOML); the built-in demo script runs when omitted
    #[arg(long)]
    script: Option<String>,

    /// RNG seed for population layout (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Use the fixed per-frame smoothing factor instead of the time-based one
    #[arg(long, default_value_t = false)]
    legacy_smoothing: bool,

    /// Run the classifier on its own thread in real time
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Scale all population counts (e.g. 0.1 for a quick run)
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Photo references to place on the tree
    #[arg(long = "photo")]
    photos: Vec<String>,
}

/// Headless stand-in for the background track.
#[derive(Default)]
struct SilentTrack {
    playing: bool,
}

impl MusicOutput for SilentTrack {
    fn play(&mut self) -> Result<(), CoreError> {
        self.playing = true;
        log::info!("music: play");
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        log::info!("music: pause");
    }
}

/// Tallies what the scene hands to the renderer.
#[derive(Default)]
struct FrameTally {
    populations: usize,
    instances: usize,
    bright: usize,
    extent: f32,
    photos: usize,
    star_height: f32,
}

impl RenderSink for FrameTally {
    fn population(
        &mut self,
        _kind: PopulationKind,
        _shape: Shape,
        model: Mat4,
        instances: &[InstanceData],
    ) {
        self.populations += 1;
        self.instances += instances.len();
        for inst in instances {
            let p = model.transform_point3(Vec3::from(inst.pos));
            self.extent = self.extent.max(p.length());
            // roughly what a bloom pass would pick up
            if inst.color[0].max(inst.color[1]).max(inst.color[2]) > 1.0 {
                self.bright += 1;
            }
        }
    }

    fn photos(&mut self, _model: Mat4, slots: &[PhotoSlot]) {
        self.photos = slots.len();
    }

    fn star(&mut self, _model: Mat4, star: &StarPose, _halo_opacity: f32) {
        self.star_height = star.position.y;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = ReplayConfig::load_or_default(&args.config);
    if args.seed.is_some() {
        cfg.scene.seed = args.seed;
    }
    if args.legacy_smoothing {
        cfg.scene.smoothing = Smoothing::Legacy {
            factor: LEGACY_SMOOTHING_FACTOR,
        };
    }
    if args.density != 1.0 {
        cfg.scene.counts = cfg.scene.counts.scaled(args.density.max(0.0));
    }
    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::builtin()?,
    };

    let fps = cfg.replay.fps.max(1.0);
    let dt = Duration::from_secs_f32(1.0 / fps);
    let mut scene = TreeScene::new(cfg.scene.clone(), 16.0 / 9.0);
    let mut state = InteractionState::new();
    state.add_photos(args.photos.iter().map(String::as_str));
    let mut adapter = GestureAdapter::default();
    let mut music = MusicSync::new();
    let mut track = SilentTrack::default();

    let mut session: GestureSession<ScriptCamera> = GestureSession::new();
    session.ready(ScriptCamera);

    let total_frames = script.total_frames() + cfg.replay.settle_frames;
    let mut classifier = ScriptedClassifier::new(script);
    let worker = if args.realtime {
        let c = std::mem::replace(&mut classifier, ScriptedClassifier::new(Script::default()));
        Some(spawn_classifier(c, session.slot(), session.cancel_token(), dt)?)
    } else {
        None
    };

    log::info!(
        "replaying {} frames at {} fps ({} smoothing)",
        total_frames,
        fps,
        match cfg.scene.smoothing {
            Smoothing::Legacy { .. } => "legacy",
            Smoothing::TimeBased { .. } => "time-based",
        }
    );

    let start = Instant::now();
    let mut last_decorations = state.decorations_visible();
    for frame in 0..total_frames {
        let now = start + dt * frame;
        if worker.is_none() {
            session.slot().publish(classifier.classify(now));
        }
        if session.status().is_ready() {
            adapter.tick(session.poll(), now, &mut state);
        } else {
            adapter.forget();
        }
        music.sync(state.music_playing(), &mut track);
        scene.frame(&state, dt);

        if state.decorations_visible() != last_decorations {
            last_decorations = state.decorations_visible();
            log::info!("decorations visible: {last_decorations}");
        }
        let log_every = cfg.replay.log_every;
        if log_every > 0 && frame % log_every == 0 {
            let mut tally = FrameTally::default();
            scene.submit(&mut tally);
            log::info!(
                "frame {frame:>4}: progress {:.2} display {:.3} gesture {} rot {:+.2} wind {:+.2} | {} pops, {} instances ({} bright), extent {:.1}, star y {:.2}, {} photos",
                state.progress(),
                scene
                    .layer(PopulationKind::Needles)
                    .map(|l| l.display_progress())
                    .unwrap_or(0.0),
                state.current_gesture().as_label(),
                state.rotation_velocity(),
                scene.wind(),
                tally.populations,
                tally.instances,
                tally.bright,
                tally.extent,
                tally.star_height,
                tally.photos,
            );
        }
        if args.realtime {
            std::thread::sleep(dt);
        }
    }

    session.shutdown();
    if let Some(handle) = worker {
        if handle.join().is_err() {
            log::error!("classifier thread panicked");
        }
    }
    log::info!(
        "done: progress {:.2}, decorations {}, music {}",
        state.progress(),
        state.decorations_visible(),
        track.playing
    );
    Ok(())
}
