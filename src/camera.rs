use crate::constants::{VIDEO_FACING_MODE, VIDEO_HEIGHT, VIDEO_WIDTH};
use js_sys::{Object, Reflect};
use tree_core::{CaptureDevice, ClassifierError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Front-facing webcam stream attached to a `<video>` element.
pub struct WebcamStream {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
}

impl CaptureDevice for WebcamStream {
    fn release(&mut self) {
        let tracks = self.stream.get_tracks();
        for t in tracks.iter() {
            if let Ok(track) = t.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
    }
}

fn video_constraints() -> Result<JsValue, JsValue> {
    let video = Object::new();
    Reflect::set(&video, &"width".into(), &JsValue::from(VIDEO_WIDTH))?;
    Reflect::set(&video, &"height".into(), &JsValue::from(VIDEO_HEIGHT))?;
    Reflect::set(&video, &"facingMode".into(), &VIDEO_FACING_MODE.into())?;
    Ok(video.into())
}

fn unavailable(e: JsValue) -> ClassifierError {
    ClassifierError::CameraUnavailable(format!("{:?}", e))
}

/// Ask for the webcam and start it playing into `video`.
pub async fn open_webcam(video: web::HtmlVideoElement) -> Result<WebcamStream, ClassifierError> {
    let window = web::window().ok_or_else(|| ClassifierError::CameraUnavailable("no window".into()))?;
    let devices = window.navigator().media_devices().map_err(unavailable)?;

    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::FALSE);
    constraints.set_video(&video_constraints().map_err(unavailable)?);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(unavailable)?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(unavailable)?
        .dyn_into()
        .map_err(unavailable)?;

    video.set_src_object(Some(&stream));
    let mut webcam = WebcamStream { stream, video };
    // from here on the tracks are stopped on every failure path
    let played = match webcam.video.play() {
        Ok(p) => JsFuture::from(p).await.map(|_| ()),
        Err(e) => Err(e),
    };
    if let Err(e) = played {
        webcam.release();
        return Err(unavailable(e));
    }
    log::info!("[camera] webcam streaming {}x{}", VIDEO_WIDTH, VIDEO_HEIGHT);
    Ok(webcam)
}
