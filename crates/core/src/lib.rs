// Core types for the mpv bridge: the engine abstraction, the fixed option
// set and the deferred command gate

pub mod engine;
pub mod error;
pub mod gate;
pub mod input;
pub mod options;
pub mod viewport;

// Re-export commonly used types
pub use engine::{Command, Engine, FrameTarget, MouseButton, Property};
pub use error::{BridgeError, Result};
pub use gate::{Bridge, GateState, InitOutcome};
pub use input::{translate_touch, TouchAction};
pub use options::{EngineOptions, OptionValue};
pub use viewport::Viewport;
