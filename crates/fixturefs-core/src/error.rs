//! Error type shared by the listing and reading operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::errno;

/// Failure of a filesystem operation, always tagged with the path involved.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("{}: no such file or directory", .path.display())]
    NotFound { path: PathBuf },
    #[error("{}: not a directory", .path.display())]
    NotADirectory { path: PathBuf },
    #[error("{}: permission denied", .path.display())]
    PermissionDenied { path: PathBuf },
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify an `io::Error` raised while operating on `path`.
    ///
    /// A named variant is only chosen when the OS code (if any) is the one
    /// that variant reports; anything else stays `Io` so its code survives.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        let os = source.raw_os_error();
        let is = |code: i32| os.is_none_or(|raw| raw == code);
        match source.kind() {
            io::ErrorKind::NotFound if is(errno::ENOENT) => Self::NotFound { path },
            io::ErrorKind::NotADirectory if is(errno::ENOTDIR) => Self::NotADirectory { path },
            io::ErrorKind::PermissionDenied if is(errno::EACCES) => {
                Self::PermissionDenied { path }
            }
            _ => Self::Io { path, source },
        }
    }

    /// The path the failing operation was given.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path }
            | Self::Io { path, .. } => path,
        }
    }

    /// POSIX errno for this failure.
    ///
    /// `Io` prefers the code reported by the OS and falls back to `EIO`.
    #[must_use]
    pub fn errno(&self) -> i32 {
        match self {
            Self::NotFound { .. } => errno::ENOENT,
            Self::NotADirectory { .. } => errno::ENOTDIR,
            Self::PermissionDenied { .. } => errno::EACCES,
            Self::Io { source, .. } => source.raw_os_error().unwrap_or(errno::EIO),
        }
    }
}
