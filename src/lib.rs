#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{GestureAdapter, GestureSession, InteractionState, MusicSync, SceneParams, TreeScene};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod classifier;
mod constants;
mod dom;
mod events;
mod frame;
mod keymap;
mod overlay;
mod render;

use constants::{CANVAS_ID, MUSIC_ID, VIDEO_ID};
use frame::FrameContext;

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<FrameContext>>>> = const { RefCell::new(None) };
}

fn with_app(f: impl FnOnce(&mut FrameContext)) {
    APP.with(|app| {
        if let Some(ctx) = app.borrow().as_ref() {
            f(&mut ctx.borrow_mut());
        }
    });
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Release the webcam when the page goes away.
fn wire_teardown(ctx: Rc<RefCell<FrameContext>>) {
    let closure = Closure::wrap(Box::new(move || {
        ctx.borrow_mut().session.shutdown();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Classifier first, then the camera. Either failing leaves manual control.
async fn start_gesture_control(ctx: Rc<RefCell<FrameContext>>, video: web::HtmlVideoElement) {
    let classifier = match classifier::JsClassifier::load(video.clone()).await {
        Ok(c) => c,
        Err(e) => {
            ctx.borrow_mut().session.fail(e);
            return;
        }
    };
    let webcam = match camera::open_webcam(video).await {
        Ok(w) => w,
        Err(e) => {
            ctx.borrow_mut().session.fail(e);
            return;
        }
    };
    let mut c = ctx.borrow_mut();
    c.session.ready(webcam);
    if c.session.status().is_ready() {
        classifier::start_loop(classifier, c.session.slot(), c.session.cancel_token());
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    wire_canvas_resize(&canvas);

    let renderer = match render::JsRenderer::from_window() {
        Ok(r) => Some(r),
        Err(e) => {
            log::error!("[render] {e}; running without output");
            None
        }
    };
    let track = document
        .get_element_by_id(MUSIC_ID)
        .and_then(|el| el.dyn_into::<web::HtmlAudioElement>().ok())
        .map(audio::ElementTrack::new);
    if track.is_none() {
        log::warn!("[music] no #{MUSIC_ID} element");
    }

    let ctx = Rc::new(RefCell::new(FrameContext {
        scene: TreeScene::new(SceneParams::default(), dom::canvas_aspect(&canvas)),
        canvas: canvas.clone(),
        document: document.clone(),
        state: InteractionState::new(),
        adapter: GestureAdapter::default(),
        session: GestureSession::new(),
        music: MusicSync::new(),
        track,
        renderer,
        last_instant: Instant::now(),
        last_status: String::new(),
    }));
    APP.with(|app| *app.borrow_mut() = Some(ctx.clone()));

    events::wire_global_keydown(ctx.clone());
    events::wire_pointerdown(canvas, ctx.clone());
    events::controls::wire_progress_slider(&document, ctx.clone());
    events::controls::wire_photo_input(&document, ctx.clone());
    wire_teardown(ctx.clone());

    match document
        .get_element_by_id(VIDEO_ID)
        .and_then(|el| el.dyn_into::<web::HtmlVideoElement>().ok())
    {
        Some(video) => spawn_local(start_gesture_control(ctx.clone(), video)),
        None => ctx
            .borrow_mut()
            .session
            .fail(tree_core::ClassifierError::CameraUnavailable(format!("missing #{VIDEO_ID}"))),
    }

    frame::start_loop(ctx);
    Ok(())
}

// ---------------- API for the page's UI controls ----------------

#[wasm_bindgen]
pub fn set_progress(value: f32) {
    with_app(|c| c.state.set_progress(value));
}

#[wasm_bindgen]
pub fn add_photos(urls: Vec<String>) {
    with_app(|c| c.state.add_photos(urls));
}

#[wasm_bindgen]
pub fn toggle_decorations() {
    with_app(|c| c.state.toggle_decorations());
}

#[wasm_bindgen]
pub fn toggle_music() {
    with_app(|c| {
        c.state.toggle_music();
        c.user_interaction();
    });
}

/// Select a photo slot, or clear the selection with `undefined`.
#[wasm_bindgen]
pub fn select_photo(index: Option<usize>) -> Result<(), JsValue> {
    let mut out = Ok(());
    with_app(|c| {
        out = match index {
            Some(i) => c.state.select_photo(i).map(|_| ()),
            None => c.state.set_active_photo(None),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()));
    });
    out
}
