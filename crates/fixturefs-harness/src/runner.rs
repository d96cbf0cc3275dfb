//! Test execution engine.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use fixturefs_core::errno;
use fixturefs_core::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use fixturefs_core::{FsError, dirent, io};

use crate::error::HarnessError;
use crate::fixtures::{FixtureCase, FixtureSet, Operation, ScratchTree};
use crate::report::{VerificationResult, render_diff};

/// Runs fixture sets and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| verify_case(case).0)
            .collect()
    }

    /// Like [`TestRunner::run`], also writing one log entry per case.
    pub fn run_logged<W: Write>(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter<W>,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let mut results = Vec::with_capacity(fixture_set.cases.len());
        for case in &fixture_set.cases {
            let (result, latency_ns) = verify_case(case);
            let (level, outcome) = if result.passed {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Error, Outcome::Fail)
            };
            let mut entry = LogEntry::new("", level, "case_verified")
                .with_symbol(result.symbol.clone())
                .with_outcome(outcome)
                .with_latency_ns(latency_ns)
                .with_details(serde_json::json!({
                    "campaign": self.campaign,
                    "family": fixture_set.family,
                    "case": result.case_name,
                }));
            if result.actual_errno != 0 {
                entry = entry.with_errno(result.actual_errno);
            }
            log.emit_entry(entry)?;
            results.push(result);
        }
        log.flush()?;
        Ok(results)
    }
}

fn verify_case(case: &FixtureCase) -> (VerificationResult, u64) {
    let started = Instant::now();
    let (actual, actual_errno) = match execute_case(case) {
        Ok(observed) => observed,
        Err(err) => (format!("harness-error:{err}"), -1),
    };
    let latency_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);

    let passed = actual == case.expected_output && actual_errno == case.expected_errno;
    let diff = (!passed).then(|| {
        let mut d = render_diff(&case.expected_output, &actual);
        if actual_errno != case.expected_errno {
            d.push_str(&format!(
                "errno: expected {}, got {actual_errno}\n",
                case.expected_errno
            ));
        }
        d
    });

    let result = VerificationResult {
        case_name: case.name.clone(),
        symbol: case.operation.symbol().to_string(),
        passed,
        expected: case.expected_output.clone(),
        actual,
        expected_errno: case.expected_errno,
        actual_errno,
        diff,
    };
    (result, latency_ns)
}

/// Materializes the case's tree in a fresh scratch root and runs it.
fn execute_case(case: &FixtureCase) -> Result<(String, i32), HarnessError> {
    case.validate()?;
    let scratch = tempfile::tempdir()?;
    materialize(scratch.path(), &case.tree)?;
    let target = scratch.path().join(&case.target);
    Ok(observe(case.operation, &target))
}

fn materialize(root: &Path, tree: &ScratchTree) -> Result<(), HarnessError> {
    for dir in &tree.dirs {
        fs::create_dir_all(root.join(dir))?;
    }
    for (rel, content) in &tree.files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

fn failure(err: &FsError) -> (String, i32) {
    let code = err.errno();
    (format!("error:{}", errno::name(code)), code)
}

/// Runs one operation and renders its result in fixture form.
#[must_use]
pub fn observe(operation: Operation, target: &Path) -> (String, i32) {
    match operation {
        Operation::ListDirectory => match dirent::list_directory(target) {
            Ok(names) => {
                let mut names: Vec<String> = names
                    .iter()
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect();
                names.sort();
                (names.join("\n"), 0)
            }
            Err(err) => failure(&err),
        },
        Operation::ReadFile => match io::read_file(target) {
            Ok(content) => (String::from_utf8_lossy(content.as_bytes()).into_owned(), 0),
            Err(err) => failure(&err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixturefs_core::structured_log::validate_log_text;

    fn set(cases: &str) -> FixtureSet {
        FixtureSet::from_json(&format!(
            r#"{{"version":"v1","family":"fixturefs/contract","captured_at":"2026-10-17T00:00:00Z","cases":[{cases}]}}"#
        ))
        .expect("valid fixture json")
    }

    #[test]
    fn listing_case_passes() {
        let fixture = set(
            r#"{"name":"abc","operation":"list_directory","tree":{"files":{"C":"","A":"","B":""}},"target":"","expected_output":"A\nB\nC"}"#,
        );
        let results = TestRunner::new("smoke").run(&fixture);
        assert_eq!(results.len(), 1);
        assert!(results[0].passed, "{:?}", results[0].diff);
    }

    #[test]
    fn nested_entries_are_not_listed() {
        let fixture = set(
            r#"{"name":"one_level","operation":"list_directory","tree":{"files":{"top":"","sub/deep":""},"dirs":["empty"]},"target":"","expected_output":"empty\nsub\ntop"}"#,
        );
        assert!(TestRunner::new("smoke").run(&fixture)[0].passed);
    }

    #[test]
    fn read_and_failure_cases_pass() {
        let fixture = set(
            r#"{"name":"greek","operation":"read_file","tree":{"files":{"g.txt":"alpha\nbeta\ngamma"}},"target":"g.txt","expected_output":"alpha\nbeta\ngamma\n"},
               {"name":"empty","operation":"read_file","tree":{"files":{"e":""}},"target":"e","expected_output":""},
               {"name":"missing","operation":"read_file","target":"nope","expected_output":"error:ENOENT","expected_errno":2},
               {"name":"not_dir","operation":"list_directory","tree":{"files":{"f":"x"}},"target":"f","expected_output":"error:ENOTDIR","expected_errno":20}"#,
        );
        let results = TestRunner::new("smoke").run(&fixture);
        assert_eq!(results.len(), 4);
        for r in &results {
            assert!(r.passed, "{}: {:?}", r.case_name, r.diff);
        }
    }

    #[test]
    fn mismatch_is_reported_with_diff() {
        let fixture = set(
            r#"{"name":"wrong","operation":"read_file","tree":{"files":{"x":"a"}},"target":"x","expected_output":"b\n"}"#,
        );
        let r = &TestRunner::new("smoke").run(&fixture)[0];
        assert!(!r.passed);
        assert_eq!(r.actual, "a\n");
        assert!(r.diff.as_deref().is_some_and(|d| d.contains("+\"a\"")));
    }

    #[test]
    fn escaping_case_fails_without_touching_disk() {
        let fixture = set(
            r#"{"name":"escape","operation":"read_file","target":"../../etc/hostname","expected_output":""}"#,
        );
        let r = &TestRunner::new("smoke").run(&fixture)[0];
        assert!(!r.passed);
        assert!(r.actual.starts_with("harness-error:"));
        assert_eq!(r.actual_errno, -1);
    }

    #[test]
    fn run_logged_emits_valid_jsonl() {
        let fixture = set(
            r#"{"name":"ok","operation":"read_file","tree":{"files":{"x":"1"}},"target":"x","expected_output":"1\n"},
               {"name":"missing","operation":"read_file","target":"nope","expected_output":"error:ENOENT","expected_errno":2}"#,
        );
        let mut log = LogEmitter::new(Vec::new(), "smoke");
        let results = TestRunner::new("smoke")
            .run_logged(&fixture, &mut log)
            .expect("log to memory");
        assert!(results.iter().all(|r| r.passed));
        let text = String::from_utf8(log.into_inner()).expect("utf8");
        assert_eq!(text.lines().count(), 2);
        assert!(validate_log_text(&text).is_empty());
        assert!(text.contains("\"errno\":2"));
    }
}
