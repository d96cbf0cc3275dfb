//! errno bridging.
//!
//! Exports report failures through the host's own thread-local `errno`, so a
//! C caller reads it the ordinary way after a sentinel return.

use std::ffi::c_int;

#[cfg(target_os = "linux")]
#[inline]
fn errno_location() -> *mut c_int {
    // SAFETY: returns the calling thread's errno slot; always valid.
    unsafe { libc::__errno_location() }
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
#[inline]
fn errno_location() -> *mut c_int {
    // SAFETY: returns the calling thread's errno slot; always valid.
    unsafe { libc::__error() }
}

#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
#[inline]
fn errno_location() -> *mut c_int {
    // SAFETY: returns the calling thread's errno slot; always valid.
    unsafe { libc::__errno() }
}

// No host errno to share: keep a private thread-local slot.
#[cfg(not(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "android",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
#[inline]
fn errno_location() -> *mut c_int {
    thread_local! {
        static ERRNO: std::cell::UnsafeCell<c_int> = const { std::cell::UnsafeCell::new(0) };
    }
    ERRNO.with(|cell| cell.get())
}

/// Set the calling thread's errno.
#[inline]
pub fn set_errno(val: c_int) {
    // SAFETY: errno_location points at this thread's errno slot.
    unsafe { *errno_location() = val };
}

/// Read the calling thread's errno.
#[inline]
#[must_use]
pub fn errno() -> c_int {
    // SAFETY: errno_location points at this thread's errno slot.
    unsafe { *errno_location() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_read() {
        set_errno(fixturefs_core::errno::ENOTDIR);
        assert_eq!(errno(), fixturefs_core::errno::ENOTDIR);
        set_errno(0);
        assert_eq!(errno(), 0);
    }

    #[test]
    fn errno_is_per_thread() {
        set_errno(fixturefs_core::errno::EACCES);
        let other = std::thread::spawn(|| {
            set_errno(fixturefs_core::errno::ENOENT);
            errno()
        })
        .join()
        .expect("thread");
        assert_eq!(other, fixturefs_core::errno::ENOENT);
        assert_eq!(errno(), fixturefs_core::errno::EACCES);
    }
}
