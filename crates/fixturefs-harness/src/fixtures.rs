//! Fixture loading and management.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Operation a case exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListDirectory,
    ReadFile,
}

impl Operation {
    /// Exported symbol whose contract this case checks. Cases run against
    /// `fixturefs_core`, not through the export itself.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::ListDirectory => fixturefs_abi::dirent_abi::C_LS_SYMBOL,
            Self::ReadFile => fixturefs_abi::io_abi::READFILE_SYMBOL,
        }
    }
}

/// Files and directories created under a fresh scratch root before a case runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScratchTree {
    /// Relative path -> file content.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    /// Relative paths of (possibly empty) directories.
    #[serde(default)]
    pub dirs: Vec<String>,
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    pub operation: Operation,
    #[serde(default)]
    pub tree: ScratchTree,
    /// Path, relative to the scratch root, handed to the operation. `""` is
    /// the root itself.
    pub target: String,
    /// Listing: sorted names joined by `\n`. Read: the content.
    /// Failures: `error:<ERRNO NAME>`.
    pub expected_output: String,
    /// Expected errno; `0` for success.
    #[serde(default)]
    pub expected_errno: i32,
}

fn is_relative_inside(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl FixtureCase {
    /// Rejects paths that would escape the scratch root.
    pub fn validate(&self) -> Result<(), HarnessError> {
        let bad = self
            .tree
            .files
            .keys()
            .chain(self.tree.dirs.iter())
            .chain(std::iter::once(&self.target))
            .find(|p| !is_relative_inside(p));
        match bad {
            Some(p) => Err(HarnessError::InvalidCase {
                case: self.name.clone(),
                message: format!("path `{p}` must stay inside the scratch root"),
            }),
            None => Ok(()),
        }
    }
}

/// A collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Family name, e.g. `fixturefs/contract`.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let wrap = |source: HarnessError| HarnessError::FixtureFile {
            path: path.to_path_buf(),
            source: Box::new(source),
        };
        let content = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        Self::from_json(&content).map_err(|e| wrap(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": "v1",
        "family": "fixturefs/contract",
        "captured_at": "2026-10-17T00:00:00Z",
        "cases": [
            {"name": "abc", "operation": "list_directory",
             "tree": {"files": {"A": "", "B": "", "C": ""}},
             "target": "", "expected_output": "A\nB\nC"},
            {"name": "missing", "operation": "read_file",
             "target": "nope", "expected_output": "error:ENOENT", "expected_errno": 2}
        ]
    }"#;

    #[test]
    fn parses_sample_with_defaults() {
        let set = FixtureSet::from_json(SAMPLE).expect("valid fixture json");
        assert_eq!(set.cases.len(), 2);
        assert_eq!(set.cases[0].operation, Operation::ListDirectory);
        assert_eq!(set.cases[0].tree.files.len(), 3);
        assert_eq!(set.cases[0].expected_errno, 0);
        assert!(set.cases[1].tree.files.is_empty());
        assert_eq!(set.cases[1].expected_errno, 2);
    }

    #[test]
    fn json_round_trip_preserves_cases() {
        let set = FixtureSet::from_json(SAMPLE).expect("valid fixture json");
        let again = FixtureSet::from_json(&set.to_json().expect("serialize")).expect("reparse");
        assert_eq!(again.cases.len(), set.cases.len());
        assert_eq!(again.cases[1].expected_output, "error:ENOENT");
    }

    #[test]
    fn escaping_paths_are_rejected() {
        let mut set = FixtureSet::from_json(SAMPLE).expect("valid fixture json");
        set.cases[1].target = "../etc/passwd".to_string();
        assert!(set.cases[1].validate().is_err());
        set.cases[1].target = "/etc/passwd".to_string();
        assert!(set.cases[1].validate().is_err());
        set.cases[1].target = "sub/ok.txt".to_string();
        assert!(set.cases[1].validate().is_ok());
    }

    #[test]
    fn operations_map_to_exports() {
        assert_eq!(Operation::ListDirectory.symbol(), "c_ls");
        assert_eq!(Operation::ReadFile.symbol(), "$char_readfile_const_char");
    }

    #[test]
    fn from_file_names_the_path_on_error() {
        let err = FixtureSet::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
