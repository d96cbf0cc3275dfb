//! Structured stderr diagnostics for exported calls.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use fixturefs_core::config::diagnostic_level;
use fixturefs_core::errno;
use fixturefs_core::structured_log::{LogEntry, LogLevel, Outcome};

use crate::errno_abi::{errno as host_errno, set_errno};

static SEQ: AtomicU64 = AtomicU64::new(0);

fn trace_id() -> String {
    let seq = SEQ.fetch_add(1, Ordering::Relaxed) + 1;
    format!("fixturefs::{}::{seq:06}", std::process::id())
}

fn elapsed_ns(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

fn write_line(entry: &LogEntry) {
    let Ok(line) = entry.to_jsonl() else {
        return;
    };
    // Best effort. A failed write must leave neither the call's result nor
    // the host's errno changed.
    let saved = host_errno();
    let mut err = std::io::stderr().lock();
    let _ = writeln!(err, "{line}");
    set_errno(saved);
}

/// Report a failed call (level `error`).
pub(crate) fn failure(
    symbol: &str,
    path: Option<&Path>,
    errno_val: i32,
    message: &str,
    started: Instant,
) {
    if !diagnostic_level().reports_failures() {
        return;
    }
    let mut entry = LogEntry::new(trace_id(), LogLevel::Error, "call_failed")
        .with_symbol(symbol)
        .with_errno(errno_val)
        .with_outcome(Outcome::Fail)
        .with_latency_ns(elapsed_ns(started))
        .with_details(serde_json::json!({
            "errno_name": errno::name(errno_val),
            "message": message,
        }));
    if let Some(path) = path {
        entry = entry.with_path(path);
    }
    write_line(&entry);
}

/// Report a successful call (level `debug`).
pub(crate) fn success(
    symbol: &str,
    path: Option<&Path>,
    started: Instant,
    details: serde_json::Value,
) {
    if !diagnostic_level().reports_success() {
        return;
    }
    let mut entry = LogEntry::new(trace_id(), LogLevel::Debug, "call_ok")
        .with_symbol(symbol)
        .with_outcome(Outcome::Pass)
        .with_latency_ns(elapsed_ns(started))
        .with_details(details);
    if let Some(path) = path {
        entry = entry.with_path(path);
    }
    write_line(&entry);
}
