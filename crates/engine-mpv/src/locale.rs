// Process locale pinning

use mpvbridge_core::{BridgeError, Result};
use std::ffi::CString;

/// Set `LC_NUMERIC` for the whole process.
///
/// mpv parses and prints floating point option values with the C library,
/// so a locale using a decimal comma breaks them.
pub fn pin_numeric_locale(locale: &str) -> Result<()> {
    let name = CString::new(locale)?;
    let applied = unsafe { libc::setlocale(libc::LC_NUMERIC, name.as_ptr()) };
    if applied.is_null() {
        return Err(BridgeError::Other(format!(
            "locale {} not available for LC_NUMERIC",
            locale
        )));
    }
    Ok(())
}
