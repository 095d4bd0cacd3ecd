// Touch to pointer translation

use crate::engine::{Command, MouseButton};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

/// Map a single-finger touch event onto mpv's pointer commands.
///
/// Down moves the pointer then presses the left button, move only moves it,
/// up only releases it.
///
/// Known issue: after release the pointer stays where the finger lifted.
/// Parking it at (0, 0) would keep it away from the on-screen controller's
/// hover area, but the controller then sometimes sees the button-up with
/// (0, 0) or stale coordinates, depending on how the input thread orders
/// the two events. Left as is until mpv's input ordering is pinned down.
pub fn translate_touch(action: TouchAction, x: i32, y: i32) -> Vec<Command> {
    match action {
        TouchAction::Down => vec![
            Command::MouseMove { x, y },
            Command::KeyDown(MouseButton::Left),
        ],
        TouchAction::Move => vec![Command::MouseMove { x, y }],
        TouchAction::Up => vec![Command::KeyUp(MouseButton::Left)],
    }
}
