// Engine event pump: forwards mpv's own log and playback errors to `log`

/// Map an mpv log level name onto a `log` level. `None` for "no" and
/// anything unrecognized.
pub fn log_level_for(mpv_level: &str) -> Option<log::Level> {
    match mpv_level {
        "fatal" | "error" => Some(log::Level::Error),
        "warn" => Some(log::Level::Warn),
        "info" | "status" => Some(log::Level::Info),
        "v" | "debug" => Some(log::Level::Debug),
        "trace" => Some(log::Level::Trace),
        _ => None,
    }
}

#[cfg(target_os = "android")]
pub use pump::EventPump;

#[cfg(target_os = "android")]
mod pump {
    use super::log_level_for;
    use crate::ffi;
    use crate::handle::{error_string, MpvHandle};
    use mpvbridge_core::{BridgeError, Result};
    use std::ffi::CStr;
    use std::os::raw::c_char;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread::{self, JoinHandle};

    /// Thread draining the handle's event queue until shutdown or drop
    pub struct EventPump {
        handle: Arc<MpvHandle>,
        stop_flag: Arc<AtomicBool>,
        thread: Option<JoinHandle<()>>,
    }

    impl EventPump {
        pub fn start(handle: Arc<MpvHandle>, min_level: &str) -> Result<Self> {
            if let Err(e) = handle.request_log_messages(min_level) {
                log::warn!("engine log forwarding unavailable: {}", e);
            }

            let stop_flag = Arc::new(AtomicBool::new(false));
            let thread = {
                let handle = handle.clone();
                let stop = stop_flag.clone();
                thread::Builder::new()
                    .name("mpv-events".into())
                    .spawn(move || event_loop(&handle, &stop))
                    .map_err(|e| BridgeError::Initialization(format!("spawn event thread: {}", e)))?
            };

            Ok(Self {
                handle,
                stop_flag,
                thread: Some(thread),
            })
        }
    }

    impl Drop for EventPump {
        fn drop(&mut self) {
            self.stop_flag.store(true, Ordering::SeqCst);
            self.handle.wakeup();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }

    fn event_loop(handle: &MpvHandle, stop: &AtomicBool) {
        log::debug!("[events] pump started");
        while !stop.load(Ordering::SeqCst) {
            let Some(event) = handle.wait_event(-1.0) else {
                continue;
            };
            match event.event_id {
                ffi::MPV_EVENT_NONE => {}
                ffi::MPV_EVENT_SHUTDOWN => {
                    log::info!("[events] engine shut down");
                    break;
                }
                ffi::MPV_EVENT_LOG_MESSAGE => {
                    let msg = unsafe { &*(event.data as *const ffi::mpv_event_log_message) };
                    forward_log_message(msg);
                }
                ffi::MPV_EVENT_END_FILE => {
                    let end = unsafe { &*(event.data as *const ffi::mpv_event_end_file) };
                    if end.reason == ffi::MPV_END_FILE_REASON_ERROR {
                        log::error!("playback ended with error: {}", error_string(end.error));
                    }
                }
                _ => {}
            }
        }
        log::debug!("[events] pump stopped");
    }

    fn forward_log_message(msg: &ffi::mpv_event_log_message) {
        let level = lossy(msg.level);
        let Some(level) = log_level_for(&level) else {
            return;
        };
        log::log!(
            target: "mpv",
            level,
            "[{}] {}",
            lossy(msg.prefix),
            lossy(msg.text).trim_end()
        );
    }

    fn lossy(s: *const c_char) -> String {
        if s.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_mpv_levels() {
        assert_eq!(log_level_for("fatal"), Some(log::Level::Error));
        assert_eq!(log_level_for("error"), Some(log::Level::Error));
        assert_eq!(log_level_for("warn"), Some(log::Level::Warn));
        assert_eq!(log_level_for("info"), Some(log::Level::Info));
        assert_eq!(log_level_for("v"), Some(log::Level::Debug));
        assert_eq!(log_level_for("trace"), Some(log::Level::Trace));
    }

    #[test]
    fn silent_and_unknown_levels_are_dropped() {
        assert_eq!(log_level_for("no"), None);
        assert_eq!(log_level_for("loud"), None);
    }
}
