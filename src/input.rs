use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, NamedKey};

/// Something the user asked for. Pointer actions carry no position; the
/// caller pairs them with the last known cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleCell,
    StampBlob,
    StampLayout,
    ToggleRunning,
    Clear,
    /// Change the step interval by this many ticks (negative = faster).
    AdjustSpeed(i32),
    ResetSpeed,
    Step,
    SelectLayout(i32),
    Quit,
}

/// Map a key event. Only releases count, so holding a key does nothing extra.
pub fn key_action(key: &Key, state: ElementState) -> Option<Action> {
    if state != ElementState::Released {
        return None;
    }
    match key {
        Key::Named(NamedKey::Space) => Some(Action::ToggleRunning),
        Key::Named(NamedKey::ArrowLeft) => Some(Action::AdjustSpeed(1)),
        Key::Named(NamedKey::ArrowRight) => Some(Action::AdjustSpeed(-1)),
        Key::Named(NamedKey::ArrowUp) => Some(Action::SelectLayout(-1)),
        Key::Named(NamedKey::ArrowDown) => Some(Action::SelectLayout(1)),
        Key::Named(NamedKey::Escape) => Some(Action::Quit),
        Key::Character(c) => match c.to_ascii_lowercase().as_str() {
            "c" => Some(Action::Clear),
            "r" => Some(Action::ResetSpeed),
            "n" => Some(Action::Step),
            _ => None,
        },
        _ => None,
    }
}

/// Map a mouse button event. Only presses count; dragging does nothing.
pub fn button_action(button: MouseButton, state: ElementState) -> Option<Action> {
    if state != ElementState::Pressed {
        return None;
    }
    match button {
        MouseButton::Left => Some(Action::ToggleCell),
        MouseButton::Right => Some(Action::StampBlob),
        MouseButton::Middle => Some(Action::StampLayout),
        _ => None,
    }
}

/// Scrolling up speeds the simulation up by one tick per notch.
pub fn scroll_action(delta: MouseScrollDelta) -> Option<Action> {
    let notches = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(pos) => pos.y / 50.0,
    };
    let ticks = notches.round() as i32;
    if ticks == 0 {
        // Small trackpad motions still move by one.
        return match notches.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Greater) => Some(Action::AdjustSpeed(-1)),
            Some(std::cmp::Ordering::Less) => Some(Action::AdjustSpeed(1)),
            _ => None,
        };
    }
    Some(Action::AdjustSpeed(-ticks))
}

/// One-line summary of the bindings and current state for the hint bar.
pub fn hint(running: bool, interval: u32, generation: u64, layout: &str) -> String {
    let state = if running { "RUN" } else { "PAUSE" };
    format!(
        "{state} GEN {generation} SPEED {interval} | SPACE RUN  C CLEAR  R RESET  </> SPEED  N STEP  LAYOUT {layout}"
    )
}
