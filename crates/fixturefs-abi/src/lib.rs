// Every export takes raw pointers from a C host; the per-function contracts are
// documented on the export table instead of repeated as safety sections.
#![allow(clippy::missing_safety_doc)]
//! # fixturefs-abi
//!
//! `extern "C"` boundary for fixturefs.
//!
//! This crate produces a `cdylib` that a host process loads at run time and
//! calls by raw symbol name:
//!
//! | symbol | C prototype |
//! |---|---|
//! | `c_ls` | `int c_ls(const char *path)` |
//! | `$char_readfile_const_char` | `char *readfile(const char *path)` |
//! | `$void_freefile_char` | `void freefile(char *content)` |
//!
//! # Architecture
//!
//! ```text
//! host -> symbol (this crate) -> argument check -> fixturefs-core -> errno + diagnostics -> return
//! ```
//!
//! Failures never unwind into the host: every export reports through its
//! sentinel (`-1` or NULL) and `errno`, plus a structured line on stderr
//! governed by `FIXTUREFS_DIAGNOSTICS`.

#[macro_use]
mod macros;

mod diag;

pub mod dirent_abi;
pub mod errno_abi;
pub mod io_abi;
pub mod symbols;
pub mod util;
