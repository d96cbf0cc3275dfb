//! CLI entrypoint for the fixturefs conformance harness.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use fixturefs_abi::symbols::{EXPORTS, Ownership};
use fixturefs_core::structured_log::{LogEmitter, validate_log_text};
use fixturefs_harness::{ConformanceReport, FixtureSet, HarnessError, TestRunner};

/// Conformance tooling for fixturefs.
#[derive(Debug, Parser)]
#[command(name = "fixturefs-harness")]
#[command(about = "Conformance testing harness for fixturefs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the listing/reading contract against a fixture set.
    Verify {
        /// Fixture set JSON file.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown). Printed to stdout if omitted.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL run log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Print the export table as JSON.
    Symbols {
        /// Output JSON path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate a structured JSONL log.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Verify {
            fixture,
            report,
            log,
            timestamp,
        } => verify(&fixture, report.as_deref(), log.as_deref(), timestamp),
        Command::Symbols { output } => symbols(output.as_deref()),
        Command::ValidateLog { log } => validate_log(&log),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("fixturefs-harness: {err}");
            ExitCode::from(2)
        }
    }
}

fn write_or_print(output: Option<&Path>, text: &str) -> Result<(), HarnessError> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn verify(
    fixture: &Path,
    report: Option<&Path>,
    log: Option<&Path>,
    timestamp: Option<String>,
) -> Result<bool, HarnessError> {
    let set = FixtureSet::from_file(fixture)?;
    let runner = TestRunner::new("verify");
    let results = match log {
        Some(path) => {
            let mut emitter = LogEmitter::to_file(path, "verify")?;
            runner.run_logged(&set, &mut emitter)?
        }
        None => runner.run(&set),
    };

    let report_doc = ConformanceReport {
        title: "fixturefs conformance".to_string(),
        family: set.family.clone(),
        timestamp: timestamp.unwrap_or_else(|| set.captured_at.clone()),
        results,
    };
    write_or_print(report, &report_doc.to_markdown())?;
    eprintln!(
        "{} passed, {} failed",
        report_doc.passed(),
        report_doc.failed()
    );
    Ok(report_doc.all_passed())
}

fn symbols(output: Option<&Path>) -> Result<bool, HarnessError> {
    let rows: Vec<_> = EXPORTS
        .iter()
        .map(|spec| {
            let release = match spec.ownership {
                Ownership::CallerReleases { release } => Some(release),
                Ownership::None => None,
            };
            serde_json::json!({
                "symbol": spec.symbol,
                "annotated": spec.is_annotated(),
                "prototype": spec.c_prototype(),
                "release": release,
                "summary": spec.summary,
            })
        })
        .collect();
    let mut text = serde_json::to_string_pretty(&rows)?;
    text.push('\n');
    write_or_print(output, &text)?;
    Ok(true)
}

fn validate_log(log: &Path) -> Result<bool, HarnessError> {
    let text = std::fs::read_to_string(log)?;
    let errors = validate_log_text(&text);
    for err in &errors {
        eprintln!("{err}");
    }
    Ok(errors.is_empty())
}
