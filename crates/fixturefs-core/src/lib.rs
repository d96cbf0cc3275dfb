//! # fixturefs-core
//!
//! Safe Rust implementations behind the fixturefs foreign-function exports.
//!
//! This crate holds everything that does not need raw pointers: one-level
//! directory enumeration, line-joined text reading, the type-annotated symbol
//! convention, errno mapping, runtime configuration and structured
//! diagnostics. No `unsafe` code is permitted at the crate level; the
//! `extern "C"` surface lives in `fixturefs-abi`.

#![deny(unsafe_code)]

pub mod config;
pub mod dirent;
pub mod errno;
pub mod error;
pub mod io;
pub mod structured_log;
pub mod symbol;

pub use error::FsError;
pub use symbol::{CType, Signature, SymbolError};
