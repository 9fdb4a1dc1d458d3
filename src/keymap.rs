// Keyboard shortcuts, kept free of web-sys so they can be tested on the host.

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    ToggleDecorations,
    ToggleMusic,
    ClearActivePhoto,
    NudgeProgress(f32),
}

#[inline]
pub fn action_for_key(key: &str, step: f32) -> Option<KeyAction> {
    match key {
        "d" | "D" => Some(KeyAction::ToggleDecorations),
        "m" | "M" => Some(KeyAction::ToggleMusic),
        "Escape" => Some(KeyAction::ClearActivePhoto),
        "ArrowUp" => Some(KeyAction::NudgeProgress(step)),
        "ArrowDown" => Some(KeyAction::NudgeProgress(-step)),
        _ => None,
    }
}

pub fn apply_action(action: KeyAction, state: &mut tree_core::InteractionState) {
    match action {
        KeyAction::ToggleDecorations => state.toggle_decorations(),
        KeyAction::ToggleMusic => state.toggle_music(),
        // clearing never fails
        KeyAction::ClearActivePhoto => {
            let _ = state.set_active_photo(None);
        }
        KeyAction::NudgeProgress(delta) => state.nudge_progress(delta),
    }
}
