// libmpv engine for the bridge
// The FFI layer only exists on Android, where libmpv and EGL are linked;
// argument marshalling, locale pinning and log level mapping build everywhere.

pub mod args;
pub mod events;
pub mod locale;

#[cfg(target_os = "android")]
mod ffi;

#[cfg(target_os = "android")]
pub mod handle;

#[cfg(target_os = "android")]
pub mod render;

#[cfg(target_os = "android")]
pub mod engine;

// Re-exports
pub use args::CommandArgs;
pub use events::log_level_for;
pub use locale::pin_numeric_locale;

#[cfg(target_os = "android")]
pub use engine::MpvEngine;
