//! One-level directory enumeration.
//!
//! Entries come back in whatever order the OS directory API yields them.
//! `.` and `..` are never produced. The directory is opened before anything
//! is yielded or written, so a bad path never produces partial output.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::FsError;

/// Streaming view over the immediate children of a directory.
pub struct Entries<'a> {
    path: &'a Path,
    inner: fs::ReadDir,
}

impl Iterator for Entries<'_> {
    type Item = Result<OsString, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        Some(
            entry
                .map(|e| e.file_name())
                .map_err(|e| FsError::from_io(self.path, e)),
        )
    }
}

/// Opens `path` for enumeration.
///
/// Fails with `NotFound` / `NotADirectory` / `PermissionDenied` before any
/// entry is produced.
pub fn entries(path: &Path) -> Result<Entries<'_>, FsError> {
    let inner = fs::read_dir(path).map_err(|e| FsError::from_io(path, e))?;
    Ok(Entries { path, inner })
}

/// Base names of the immediate children of `path`, in enumeration order.
pub fn list_directory(path: &Path) -> Result<Vec<OsString>, FsError> {
    entries(path)?.collect()
}

/// Writes one base name per line to `out`, returning how many were written.
///
/// Names are written as raw bytes on Unix; elsewhere they go through a lossy
/// UTF-8 conversion.
pub fn write_listing<W: Write>(path: &Path, out: &mut W) -> Result<usize, FsError> {
    let mut written = 0usize;
    for name in entries(path)? {
        let name = name?;
        write_name(out, &name).map_err(|e| FsError::from_io(path, e))?;
        written += 1;
    }
    out.flush().map_err(|e| FsError::from_io(path, e))?;
    Ok(written)
}

#[cfg(unix)]
fn write_name<W: Write>(out: &mut W, name: &std::ffi::OsStr) -> std::io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(name.as_bytes())?;
    out.write_all(b"\n")
}

#[cfg(not(unix))]
fn write_name<W: Write>(out: &mut W, name: &std::ffi::OsStr) -> std::io::Result<()> {
    writeln!(out, "{}", name.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn scratch(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in names {
            fs::write(dir.path().join(name), b"x").expect("write");
        }
        dir
    }

    #[test]
    fn lists_exact_base_names() {
        let dir = scratch(&["A", "B", "C"]);
        let got: BTreeSet<_> = list_directory(dir.path())
            .expect("list")
            .into_iter()
            .collect();
        let want: BTreeSet<OsString> = ["A", "B", "C"].iter().map(OsString::from).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn subdirectories_are_listed_without_descending() {
        let dir = scratch(&["top"]);
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        fs::write(dir.path().join("sub").join("deep"), b"x").expect("write");
        let mut got = list_directory(dir.path()).expect("list");
        got.sort();
        assert_eq!(got, vec![OsString::from("sub"), OsString::from("top")]);
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let dir = scratch(&[]);
        assert!(list_directory(dir.path()).expect("list").is_empty());
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = scratch(&[]);
        let err = list_directory(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn regular_file_is_not_a_directory() {
        let dir = scratch(&["plain"]);
        let err = list_directory(&dir.path().join("plain")).unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));
    }

    #[test]
    fn write_listing_emits_one_line_per_entry() {
        let dir = scratch(&["one", "two"]);
        let mut out = Vec::new();
        let n = write_listing(dir.path(), &mut out).expect("write listing");
        assert_eq!(n, 2);
        let text = String::from_utf8(out).expect("utf8");
        let mut lines: Vec<_> = text.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["one", "two"]);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn write_listing_on_bad_path_writes_nothing() {
        let dir = scratch(&[]);
        let mut out = Vec::new();
        assert!(write_listing(&dir.path().join("missing"), &mut out).is_err());
        assert!(out.is_empty());
    }
}
