use crate::frame::FrameContext;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width() as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height() as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Click on the canvas: toggle the photo panel under the pointer.
pub fn wire_pointerdown(canvas: web::HtmlCanvasElement, ctx: Rc<RefCell<FrameContext>>) {
    let canvas_for_listener = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = pointer_canvas_px(&ev, &canvas);
        let mut c = ctx.borrow_mut();
        c.user_interaction();
        let hit = c.scene.pick_photo(
            pos.x,
            pos.y,
            canvas.width() as f32,
            canvas.height() as f32,
        );
        if let Some(i) = hit {
            match c.state.select_photo(i) {
                Ok(active) => log::info!("[click] photo {} -> active {:?}", i, active),
                Err(e) => log::warn!("[click] {e}"),
            }
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}
