// Owned mpv client handle

use crate::args::CommandArgs;
use crate::ffi;
use mpvbridge_core::{BridgeError, OptionValue, Result};
use std::ffi::{CStr, CString};
use std::os::raw::{c_int, c_void};
use std::ptr::NonNull;

/// An mpv core created with `mpv_create`, destroyed on drop.
pub struct MpvHandle {
    ptr: NonNull<ffi::mpv_handle>,
}

// The client API is thread-safe; only mpv_wait_event is restricted to one
// thread, and the event pump is the only caller.
unsafe impl Send for MpvHandle {}
unsafe impl Sync for MpvHandle {}

impl MpvHandle {
    pub fn create() -> Result<Self> {
        let ptr = unsafe { ffi::mpv_create() };
        NonNull::new(ptr)
            .map(|ptr| Self { ptr })
            .ok_or_else(|| BridgeError::Initialization("context init failed".into()))
    }

    pub(crate) fn as_ptr(&self) -> *mut ffi::mpv_handle {
        self.ptr.as_ptr()
    }

    pub fn set_option(&self, name: &str, value: &OptionValue) -> Result<()> {
        let c_name = CString::new(name)?;
        let code = match value {
            OptionValue::Flag(flag) => {
                let mut data: c_int = *flag as c_int;
                unsafe {
                    ffi::mpv_set_option(
                        self.as_ptr(),
                        c_name.as_ptr(),
                        ffi::MPV_FORMAT_FLAG,
                        &mut data as *mut c_int as *mut c_void,
                    )
                }
            }
            OptionValue::Text(text) => {
                let c_text = CString::new(text.as_str())?;
                unsafe {
                    ffi::mpv_set_option_string(self.as_ptr(), c_name.as_ptr(), c_text.as_ptr())
                }
            }
        };
        check(code, name)
    }

    pub fn initialize(&self) -> Result<()> {
        let code = unsafe { ffi::mpv_initialize(self.as_ptr()) };
        check(code, "mpv_initialize")
    }

    pub fn command<S: AsRef<str>>(&self, args: &[S]) -> Result<()> {
        let mut c_args = CommandArgs::new(args)?;
        let code = unsafe { ffi::mpv_command(self.as_ptr(), c_args.as_mut_ptr()) };
        check(code, args.first().map(|a| a.as_ref()).unwrap_or("command"))
    }

    pub fn set_flag_property(&self, name: &str, flag: bool) -> Result<()> {
        let c_name = CString::new(name)?;
        let mut data: c_int = flag as c_int;
        let code = unsafe {
            ffi::mpv_set_property(
                self.as_ptr(),
                c_name.as_ptr(),
                ffi::MPV_FORMAT_FLAG,
                &mut data as *mut c_int as *mut c_void,
            )
        };
        check(code, name)
    }

    pub fn request_log_messages(&self, min_level: &str) -> Result<()> {
        let c_level = CString::new(min_level)?;
        let code = unsafe { ffi::mpv_request_log_messages(self.as_ptr(), c_level.as_ptr()) };
        check(code, "mpv_request_log_messages")
    }

    /// Block until the next event or `wakeup`. Single consumer only.
    pub(crate) fn wait_event(&self, timeout: f64) -> Option<&ffi::mpv_event> {
        let event = unsafe { ffi::mpv_wait_event(self.as_ptr(), timeout) };
        unsafe { event.as_ref() }
    }

    pub fn wakeup(&self) {
        unsafe { ffi::mpv_wakeup(self.as_ptr()) }
    }
}

impl Drop for MpvHandle {
    fn drop(&mut self) {
        log::info!("destroying mpv handle");
        unsafe { ffi::mpv_terminate_destroy(self.as_ptr()) }
    }
}

pub fn error_string(code: c_int) -> String {
    let msg = unsafe { ffi::mpv_error_string(code) };
    if msg.is_null() {
        return format!("mpv error {}", code);
    }
    unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
}

pub(crate) fn check(code: c_int, what: &str) -> Result<()> {
    if code < ffi::MPV_ERROR_SUCCESS {
        Err(BridgeError::Engine(format!("{}: {}", what, error_string(code))))
    } else {
        Ok(())
    }
}
