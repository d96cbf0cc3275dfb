//! File reading exports.
//!
//! `$char_readfile_const_char` hands the caller a heap buffer that stays valid
//! until the caller passes it to `$void_freefile_char`. The buffer comes from
//! Rust's allocator, so the host's `free()` must never be used on it.

use std::ffi::{CString, c_char};
use std::time::Instant;

use fixturefs_core::errno;
use fixturefs_core::io as io_core;

use crate::diag;
use crate::errno_abi::set_errno;
use crate::util::path_arg;

/// Exported symbol name of [`readfile`].
pub const READFILE_SYMBOL: &str = "$char_readfile_const_char";
/// Exported symbol name of [`freefile`].
pub const FREEFILE_SYMBOL: &str = "$void_freefile_char";

abi_fn! {
    /// `char *readfile(const char *path)`
    ///
    /// Returns the file's lines, each terminated by `\n`, as a NUL-terminated
    /// buffer owned by the caller, or NULL if the file cannot be opened (errno
    /// set: `EFAULT` for a NULL path, otherwise the OS error). An empty file
    /// yields a non-NULL empty string. Content after an embedded NUL byte is
    /// dropped. Release the result with `$void_freefile_char`.
    export "$char_readfile_const_char"
    fn readfile(path: *const c_char) -> *mut c_char {
        let started = Instant::now();

        let Some(file) = path_arg(path) else {
            diag::failure(READFILE_SYMBOL, None, errno::EFAULT, "null path", started);
            set_errno(errno::EFAULT);
            return std::ptr::null_mut();
        };

        match io_core::read_file(file) {
            Ok(content) => {
                let details = serde_json::json!({
                    "bytes": content.len(),
                    "lines": content.line_count(),
                });
                let owned = content.into_c_string();
                diag::success(READFILE_SYMBOL, Some(file), started, details);
                owned.into_raw()
            }
            Err(err) => {
                let code = err.errno();
                diag::failure(READFILE_SYMBOL, Some(file), code, &err.to_string(), started);
                set_errno(code);
                std::ptr::null_mut()
            }
        }
    }
}

abi_fn! {
    /// `void freefile(char *content)`
    ///
    /// Releases a buffer returned by `$char_readfile_const_char`. NULL is a
    /// no-op. Passing any other pointer, or the same pointer twice, is
    /// undefined behavior.
    export "$void_freefile_char"
    fn freefile(content: *mut c_char) {
        if content.is_null() {
            return;
        }
        // SAFETY: caller contract: `content` came from `readfile` and has not
        // been released yet.
        drop(CString::from_raw(content));
    }
}
