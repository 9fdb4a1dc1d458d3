use crate::constants::{PHOTO_INPUT_ID, PROGRESS_SLIDER_ID};
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn input_by_id(document: &web::Document, id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

/// Range input (0..1) writing progress directly.
pub fn wire_progress_slider(document: &web::Document, ctx: Rc<RefCell<FrameContext>>) {
    let Some(slider) = input_by_id(document, PROGRESS_SLIDER_ID) else {
        return;
    };
    let slider_for_listener = slider.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let value = slider.value_as_number();
        if value.is_finite() {
            ctx.borrow_mut().state.set_progress(value as f32);
        }
    }) as Box<dyn FnMut()>);
    _ = slider_for_listener.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// File input appending the chosen images to the photo list.
pub fn wire_photo_input(document: &web::Document, ctx: Rc<RefCell<FrameContext>>) {
    let Some(input) = input_by_id(document, PHOTO_INPUT_ID) else {
        return;
    };
    let input_for_listener = input.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let Some(files) = input.files() else {
            return;
        };
        let mut urls = Vec::with_capacity(files.length() as usize);
        for i in 0..files.length() {
            let Some(file) = files.get(i) else { continue };
            match web::Url::create_object_url_with_blob(&file) {
                Ok(url) => urls.push(url),
                Err(e) => log::warn!("[photos] {:?}", e),
            }
        }
        ctx.borrow_mut().state.add_photos(urls);
    }) as Box<dyn FnMut()>);
    _ = input_for_listener.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}
