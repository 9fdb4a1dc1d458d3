use crate::constants::KEY_PROGRESS_STEP;
use crate::frame::FrameContext;
use crate::keymap::{action_for_key, apply_action, KeyAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, ctx: &Rc<RefCell<FrameContext>>) {
    // leave typing in form fields alone
    if let Some(target) = ev.target() {
        if target.dyn_ref::<web::HtmlInputElement>().is_some() {
            return;
        }
    }
    let mut c = ctx.borrow_mut();
    if let Some(action) = action_for_key(&ev.key(), KEY_PROGRESS_STEP) {
        if matches!(action, KeyAction::NudgeProgress(_)) {
            ev.prevent_default();
        }
        apply_action(action, &mut c.state);
        log::info!("[keys] {:?}", action);
    }
    c.user_interaction();
}

pub fn wire_global_keydown(ctx: Rc<RefCell<FrameContext>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &ctx);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
