// Engine abstraction: the command vocabulary the bridge forwards to mpv

use crate::error::Result;

/// Mouse buttons as named in mpv's input vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
}

impl MouseButton {
    pub fn key_name(&self) -> &'static str {
        match self {
            MouseButton::Left => "MOUSE_BTN0",
        }
    }
}

/// Commands forwarded to the engine's command interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the current playlist with `path`
    LoadFile(String),

    /// Move the pointer
    MouseMove { x: i32, y: i32 },

    /// Press a button; `mouse` alone never produces key events
    KeyDown(MouseButton),

    /// Release a button
    KeyUp(MouseButton),
}

impl Command {
    /// Argument vector in mpv's command syntax, command name first
    pub fn args(&self) -> Vec<String> {
        match self {
            Command::LoadFile(path) => vec!["loadfile".to_string(), path.clone()],
            Command::MouseMove { x, y } => {
                vec!["mouse".to_string(), x.to_string(), y.to_string()]
            }
            Command::KeyDown(button) => vec!["keydown".to_string(), button.key_name().to_string()],
            Command::KeyUp(button) => vec!["keyup".to_string(), button.key_name().to_string()],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadFile(_) => "loadfile",
            Command::MouseMove { .. } => "mouse",
            Command::KeyDown(_) => "keydown",
            Command::KeyUp(_) => "keyup",
        }
    }
}

/// Properties the bridge writes at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Pause(bool),
}

impl Property {
    pub fn name(&self) -> &'static str {
        match self {
            Property::Pause(_) => "pause",
        }
    }

    pub fn flag(&self) -> bool {
        match self {
            Property::Pause(paused) => *paused,
        }
    }
}

/// Where and how one frame is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTarget {
    /// GL framebuffer object, 0 for the window surface
    pub fbo: i32,
    pub width: i32,
    pub height: i32,
    /// GL's origin is bottom-left; surfaces from the host are top-left
    pub flip_y: bool,
}

/// A constructed, initialized playback engine.
///
/// Calls arrive from both the host's render thread and its UI thread, so
/// implementations must tolerate concurrent use through `&self`.
pub trait Engine: Send + Sync {
    /// Run a command
    fn command(&self, command: &Command) -> Result<()>;

    /// Set a runtime property
    fn set_property(&self, property: &Property) -> Result<()>;

    /// Draw one frame; must be called on the thread owning the GL context
    fn render(&self, target: &FrameTarget) -> Result<()>;
}
