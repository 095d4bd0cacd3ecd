// NUL-terminated argument vectors for mpv_command

use mpvbridge_core::Result;
use std::ffi::CString;
use std::os::raw::c_char;

/// Owns the C strings of one command and the pointer array mpv reads them
/// through. The array ends with a null pointer.
pub struct CommandArgs {
    _owned: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl CommandArgs {
    pub fn new<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let owned = args
            .iter()
            .map(|arg| CString::new(arg.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let ptrs = owned
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(std::iter::once(std::ptr::null()))
            .collect();
        Ok(Self { _owned: owned, ptrs })
    }

    pub fn as_mut_ptr(&mut self) -> *mut *const c_char {
        self.ptrs.as_mut_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpvbridge_core::BridgeError;
    use std::ffi::CStr;

    #[test]
    fn pointer_array_is_null_terminated() {
        let mut args = CommandArgs::new(&["loadfile", "/sdcard/a b.mp4"]).unwrap();
        let ptr = args.as_mut_ptr();
        unsafe {
            assert_eq!(CStr::from_ptr(*ptr).to_str().unwrap(), "loadfile");
            assert_eq!(CStr::from_ptr(*ptr.add(1)).to_str().unwrap(), "/sdcard/a b.mp4");
            assert!((*ptr.add(2)).is_null());
        }
    }

    #[test]
    fn empty_string_argument_is_kept() {
        let mut args = CommandArgs::new(&["loadfile", ""]).unwrap();
        let ptr = args.as_mut_ptr();
        unsafe {
            assert_eq!(CStr::from_ptr(*ptr.add(1)).to_bytes(), b"");
            assert!((*ptr.add(2)).is_null());
        }
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = CommandArgs::new(&["loadfile", "bad\0path"]).err();
        assert!(matches!(err, Some(BridgeError::InvalidArgument(_))));
    }
}
