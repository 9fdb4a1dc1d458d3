//! Bridge to the page's hand-gesture classifier.
//!
//! The page exposes `window.treeGestures` with an async `init()` and a
//! synchronous `recognizeForVideo(video, timestampMs)` returning
//! `{ gestures: [[{ categoryName }]], landmarks: [[{ x, y }]] }`.

use crate::constants::CLASSIFIER_GLOBAL;
use instant::Instant;
use js_sys::{Array, Function, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{CancelToken, Classification, ClassifierError, HandClassifier, HandReading, ResultSlot};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct JsClassifier {
    handle: JsValue,
    recognize: Function,
    video: web::HtmlVideoElement,
    last_video_time: f64,
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, ClassifierError> {
    Reflect::get(target, &JsValue::from_str(key))
        .map_err(|e| ClassifierError::Malformed(format!("{key}: {:?}", e)))
}

fn first(value: &JsValue) -> Option<JsValue> {
    value
        .dyn_ref::<Array>()
        .filter(|a| a.length() > 0)
        .map(|a| a.get(0))
}

/// Turn one raw result into zero or one hand.
pub fn parse_result(result: &JsValue) -> Classification {
    let gestures = get(result, "gestures")?;
    let Some(category) = first(&gestures).as_ref().and_then(first) else {
        return Ok(None);
    };
    let label = get(&category, "categoryName")?
        .as_string()
        .ok_or_else(|| ClassifierError::Malformed("categoryName is not a string".into()))?;

    let landmarks = get(result, "landmarks")?;
    let wrist = first(&landmarks)
        .as_ref()
        .and_then(first)
        .ok_or_else(|| ClassifierError::Malformed("gesture without landmarks".into()))?;
    let coord = |k: &str| -> Result<f32, ClassifierError> {
        get(&wrist, k)?
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| ClassifierError::Malformed(format!("landmark {k} is not a number")))
    };
    Ok(Some(HandReading::from_label(&label, coord("x")?, coord("y")?)?))
}

impl JsClassifier {
    /// Initialize the page's classifier (model download happens here).
    pub async fn load(video: web::HtmlVideoElement) -> Result<Self, ClassifierError> {
        let window = web::window().ok_or_else(|| ClassifierError::Init("no window".into()))?;
        let handle = get(&window, CLASSIFIER_GLOBAL)?;
        if handle.is_undefined() || handle.is_null() {
            return Err(ClassifierError::Init(format!("window.{CLASSIFIER_GLOBAL} missing")));
        }
        let init: Function = get(&handle, "init")?
            .dyn_into()
            .map_err(|_| ClassifierError::Init("init is not a function".into()))?;
        let promise: js_sys::Promise = init
            .call0(&handle)
            .map_err(|e| ClassifierError::Init(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|_| ClassifierError::Init("init did not return a promise".into()))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| ClassifierError::Init(format!("{:?}", e)))?;
        let recognize: Function = get(&handle, "recognizeForVideo")?
            .dyn_into()
            .map_err(|_| ClassifierError::Init("recognizeForVideo is not a function".into()))?;
        log::info!("[gesture] classifier loaded");
        Ok(Self {
            handle,
            recognize,
            video,
            last_video_time: -1.0,
        })
    }

    /// True once per decoded video frame.
    fn has_new_frame(&mut self) -> bool {
        let t = self.video.current_time();
        if t == self.last_video_time {
            return false;
        }
        self.last_video_time = t;
        true
    }
}

impl HandClassifier for JsClassifier {
    fn classify(&mut self, _now: Instant) -> Classification {
        let result = self
            .recognize
            .call2(&self.handle, &self.video, &JsValue::from(js_sys::Date::now()))
            .map_err(|e| ClassifierError::Frame(format!("{:?}", e)))?;
        parse_result(&result)
    }
}

/// Run the classifier on its own animation-frame cycle, publishing into
/// `slot`, until `cancel` is set.
pub fn start_loop(classifier: JsClassifier, slot: ResultSlot, cancel: CancelToken) {
    let classifier = Rc::new(RefCell::new(classifier));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if cancel.is_cancelled() {
            log::info!("[gesture] classifier loop stopped");
            return;
        }
        {
            let mut c = classifier.borrow_mut();
            if c.has_new_frame() {
                slot.publish(c.classify(Instant::now()));
            }
        }
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
