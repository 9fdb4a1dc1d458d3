use crate::constants::{STATUS_ID, STATUS_LOADING, STATUS_UNAVAILABLE};
use tree_core::{Gesture, GestureStatus};
use web_sys as web;

/// Text shown in the gesture status overlay.
pub fn status_text(status: &GestureStatus, hand_detected: bool, gesture: Gesture) -> String {
    match status {
        GestureStatus::Loading => STATUS_LOADING.to_string(),
        GestureStatus::Unavailable(_) => STATUS_UNAVAILABLE.to_string(),
        GestureStatus::Ready if hand_detected => format!("Gesture: {}", gesture.as_label()),
        GestureStatus::Ready => "No hand detected".to_string(),
    }
}

/// Update the status overlay; skips the DOM write when nothing changed.
pub fn update_status(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}
