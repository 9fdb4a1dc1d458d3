use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{CoreError, MusicOutput};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Background track backed by an `<audio>` element.
///
/// `play()` resolves asynchronously; a rejection (autoplay policy) lands in
/// `refusal` and is handed to `MusicSync` on the next frame.
pub struct ElementTrack {
    el: web::HtmlAudioElement,
    refusal: Rc<RefCell<Option<String>>>,
}

impl ElementTrack {
    pub fn new(el: web::HtmlAudioElement) -> Self {
        el.set_loop(true);
        Self {
            el,
            refusal: Rc::new(RefCell::new(None)),
        }
    }

    /// A refusal reported since the last call, if any.
    pub fn take_refusal(&self) -> Option<String> {
        self.refusal.borrow_mut().take()
    }
}

impl MusicOutput for ElementTrack {
    fn play(&mut self) -> Result<(), CoreError> {
        let promise = self
            .el
            .play()
            .map_err(|e| CoreError::PlaybackRefused(format!("{:?}", e)))?;
        let refusal = self.refusal.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                *refusal.borrow_mut() = Some(format!("{:?}", e));
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        _ = self.el.pause();
    }
}
