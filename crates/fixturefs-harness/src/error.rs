//! Harness error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{}: {source}", .path.display())]
    FixtureFile {
        path: PathBuf,
        #[source]
        source: Box<HarnessError>,
    },
    #[error("case `{case}`: {message}")]
    InvalidCase { case: String, message: String },
}
