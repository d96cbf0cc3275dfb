//! Line-joined text file reading.
//!
//! A file is read line by line and every line is re-terminated with a single
//! `\n`, so an unterminated final line still ends in `\n` and a zero-byte file
//! yields empty content. Once the open succeeds, the lines read so far are
//! always returned even if a later read fails.

use std::ffi::CString;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::FsError;

/// Owned text content of a file, newline-terminated per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContent {
    bytes: Vec<u8>,
}

impl FileContent {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Number of lines read.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.bytes.iter().filter(|&&b| b == b'\n').count()
    }

    /// Converts into a C string, truncating at the first NUL byte.
    ///
    /// A C caller stops at the first NUL anyway, so nothing it could observe
    /// is lost.
    #[must_use]
    pub fn into_c_string(self) -> CString {
        let mut bytes = self.bytes;
        if let Some(nul) = bytes.iter().position(|&b| b == 0) {
            bytes.truncate(nul);
        }
        // No interior NUL remains after truncation.
        CString::new(bytes).unwrap_or_default()
    }
}

impl From<FileContent> for Vec<u8> {
    fn from(content: FileContent) -> Self {
        content.bytes
    }
}

/// Reads `path` into newline-joined lines.
///
/// Returns `Err` only when the file cannot be opened.
pub fn read_file(path: &Path) -> Result<FileContent, FsError> {
    let file = File::open(path).map_err(|e| FsError::from_io(path, e))?;
    Ok(read_lines(file))
}

/// Joins the lines of any reader. Read errors end the content at the last
/// complete line.
pub fn read_lines<R: Read>(reader: R) -> FileContent {
    let mut reader = BufReader::new(reader);
    let mut bytes = Vec::new();
    loop {
        let line_start = bytes.len();
        match reader.read_until(b'\n', &mut bytes) {
            Ok(0) => break,
            Ok(_) => {
                if bytes.last() != Some(&b'\n') {
                    bytes.push(b'\n');
                }
            }
            Err(_) => {
                bytes.truncate(line_start);
                break;
            }
        }
    }
    FileContent { bytes }
}
