//! Shared internal utilities for ABI adapters.

use std::ffi::{CStr, c_char};
use std::path::Path;

/// Borrow a NUL-terminated path argument.
///
/// Returns `None` for NULL. On Unix the bytes are used verbatim; elsewhere the
/// path must be valid UTF-8.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated string that stays alive
/// and unmodified for `'a`.
pub unsafe fn path_arg<'a>(ptr: *const c_char) -> Option<&'a Path> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let raw = unsafe { CStr::from_ptr(ptr) };
    bytes_to_path(raw.to_bytes())
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> Option<&Path> {
    use std::os::unix::ffi::OsStrExt;
    Some(Path::new(std::ffi::OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> Option<&Path> {
    std::str::from_utf8(bytes).ok().map(Path::new)
}
