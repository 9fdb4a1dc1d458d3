use crate::audio::ElementTrack;
use crate::camera::WebcamStream;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom;
use crate::overlay;
use crate::render::JsRenderer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tree_core::{GestureAdapter, GestureSession, InteractionState, MusicSync, TreeScene};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the render tick and the event handlers share.
pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub scene: TreeScene,
    pub state: InteractionState,
    pub adapter: GestureAdapter,
    pub session: GestureSession<WebcamStream>,
    pub music: MusicSync,
    pub track: Option<ElementTrack>,
    pub renderer: Option<JsRenderer>,
    pub last_instant: Instant,
    pub last_status: String,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(Duration::from_secs_f32(MAX_FRAME_DT_SEC));
        self.last_instant = now;

        // newest classification wins; none means repeat the last reading
        if self.session.status().is_ready() {
            let fresh = self.session.poll();
            self.adapter.tick(fresh, now, &mut self.state);
        } else {
            self.adapter.forget();
        }

        if let Some(track) = self.track.as_mut() {
            if let Some(reason) = track.take_refusal() {
                self.music.report_refused(&reason);
            }
            self.music.sync(self.state.music_playing(), track);
        }

        self.scene.set_aspect(dom::canvas_aspect(&self.canvas));
        self.scene.frame(&self.state, dt);
        if let Some(renderer) = self.renderer.as_mut() {
            self.scene.submit(renderer);
        }

        let text = overlay::status_text(
            self.session.status(),
            self.state.hand_detected(),
            self.state.current_gesture(),
        );
        if text != self.last_status {
            overlay::update_status(&self.document, &text);
            self.last_status = text;
        }
    }

    /// Click, touch or key: retry a refused play, and start a freshly
    /// requested one while the browser still counts this as a user gesture.
    pub fn user_interaction(&mut self) {
        if let Some(track) = self.track.as_mut() {
            self.music.on_user_interaction(track);
            self.music.sync(self.state.music_playing(), track);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
