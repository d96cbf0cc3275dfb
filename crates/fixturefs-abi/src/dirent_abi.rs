//! Directory listing export (`c_ls`).
//!
//! Prints the base name of every immediate child of a directory, one per
//! line, to the process's standard output. Enumeration delegates to
//! `fixturefs_core::dirent`.

use std::ffi::{c_char, c_int};
use std::io::Write;
use std::time::Instant;

use fixturefs_core::dirent as dirent_core;
use fixturefs_core::errno;

use crate::diag;
use crate::errno_abi::set_errno;
use crate::util::path_arg;

/// Exported symbol name of [`c_ls`].
pub const C_LS_SYMBOL: &str = "c_ls";

/// Lists `path` into `out`, reporting failure the way [`c_ls`] does.
///
/// Returns `0` on success and `-1` (with errno set) on failure. Nothing is
/// written when the directory cannot be opened.
///
/// # Safety
///
/// `path` must be NULL or a valid NUL-terminated string.
pub unsafe fn list_into<W: Write>(path: *const c_char, out: &mut W) -> c_int {
    let started = Instant::now();

    let Some(dir) = (unsafe { path_arg(path) }) else {
        diag::failure(C_LS_SYMBOL, None, errno::EFAULT, "null path", started);
        set_errno(errno::EFAULT);
        return -1;
    };

    match dirent_core::write_listing(dir, out) {
        Ok(count) => {
            diag::success(
                C_LS_SYMBOL,
                Some(dir),
                started,
                serde_json::json!({ "entries": count }),
            );
            0
        }
        Err(err) => {
            let code = err.errno();
            diag::failure(C_LS_SYMBOL, Some(dir), code, &err.to_string(), started);
            set_errno(code);
            -1
        }
    }
}

abi_fn! {
    /// `int c_ls(const char *path)`
    ///
    /// Flushes the host's C stdio streams, then writes one entry name per
    /// line to stdout, in enumeration order, and flushes before returning.
    /// Returns `0` on success; on failure returns `-1`, sets errno (`EFAULT`
    /// for NULL, otherwise the OS error such as `ENOENT` or `ENOTDIR`) and
    /// prints no entries. Hosts that declare the symbol as returning `void`
    /// may ignore the result.
    fn c_ls(path: *const c_char) -> c_int {
        // The listing goes straight to fd 1; drain whatever the host has
        // buffered in C stdio first so output stays in call order.
        libc::fflush(std::ptr::null_mut());
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        list_into(path, &mut out)
    }
}
