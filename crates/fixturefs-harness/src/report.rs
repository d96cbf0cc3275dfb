//! Verification results and conformance reports.

use serde::{Deserialize, Serialize};

/// Outcome of one fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub case_name: String,
    pub symbol: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    pub expected_errno: i32,
    pub actual_errno: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Aggregated results of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    pub family: String,
    pub timestamp: String,
    pub results: Vec<VerificationResult>,
}

impl ConformanceReport {
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Render a markdown report.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- family: `{}`\n", self.family));
        out.push_str(&format!("- generated: {}\n", self.timestamp));
        out.push_str(&format!(
            "- passed: {}/{}\n\n",
            self.passed(),
            self.results.len()
        ));
        out.push_str("| case | symbol | errno (exp/got) | result |\n");
        out.push_str("|---|---|---|---|\n");
        for r in &self.results {
            out.push_str(&format!(
                "| {} | `{}` | {}/{} | {} |\n",
                r.case_name,
                r.symbol,
                r.expected_errno,
                r.actual_errno,
                if r.passed { "PASS" } else { "FAIL" }
            ));
        }
        for r in self.results.iter().filter(|r| !r.passed) {
            if let Some(diff) = &r.diff {
                out.push_str(&format!("\n## {}\n\n```diff\n{diff}```\n", r.case_name));
            }
        }
        out
    }
}

/// Line diff of expected vs actual, `-`/`+` prefixed, shared lines with two spaces.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    let exp: Vec<&str> = expected.split('\n').collect();
    let act: Vec<&str> = actual.split('\n').collect();
    let mut out = String::new();
    for i in 0..exp.len().max(act.len()) {
        match (exp.get(i), act.get(i)) {
            (Some(e), Some(a)) if e == a => out.push_str(&format!("  {e}\n")),
            (e, a) => {
                if let Some(e) = e {
                    out.push_str(&format!("-{e:?}\n"));
                }
                if let Some(a) = a {
                    out.push_str(&format!("+{a:?}\n"));
                }
            }
        }
    }
    out
}
