//! Runtime diagnostics configuration.
//!
//! The level is set via the `FIXTUREFS_DIAGNOSTICS` environment variable:
//! - `error` (default): failed calls emit one structured line on stderr.
//! - `debug`: successful calls are reported too.
//! - `off`: nothing is written to stderr.
//!
//! The level only governs stderr diagnostics. Return values and errno are the
//! same at every level.

use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable consulted on first use.
pub const DIAGNOSTICS_ENV: &str = "FIXTUREFS_DIAGNOSTICS";

/// How much the exported functions report on stderr.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// No diagnostics.
    Off,
    /// Failed calls only.
    #[default]
    Error,
    /// Every call.
    Debug,
}

impl DiagnosticLevel {
    /// Parse from string (case-insensitive). Unknown values map to the default.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" | "quiet" | "0" => Self::Off,
            "debug" | "trace" | "verbose" | "2" => Self::Debug,
            _ => Self::Error,
        }
    }

    /// Returns true if failures should be reported.
    #[must_use]
    pub const fn reports_failures(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Returns true if successful calls should be reported.
    #[must_use]
    pub const fn reports_success(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Lowercase name, as accepted by [`DiagnosticLevel::from_str_loose`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Debug => "debug",
        }
    }
}

// Atomic cache: 0=unresolved, 1=Off, 2=Error, 3=Debug, 255=resolving.
// A reentrant or racing reader during resolution gets the default instead of
// waiting on a lock.
static CACHED_LEVEL: AtomicU8 = AtomicU8::new(LEVEL_UNRESOLVED);

const LEVEL_UNRESOLVED: u8 = 0;
const LEVEL_OFF: u8 = 1;
const LEVEL_ERROR: u8 = 2;
const LEVEL_DEBUG: u8 = 3;
const LEVEL_RESOLVING: u8 = 255;

fn level_to_u8(level: DiagnosticLevel) -> u8 {
    match level {
        DiagnosticLevel::Off => LEVEL_OFF,
        DiagnosticLevel::Error => LEVEL_ERROR,
        DiagnosticLevel::Debug => LEVEL_DEBUG,
    }
}

fn u8_to_level(v: u8) -> DiagnosticLevel {
    match v {
        LEVEL_OFF => DiagnosticLevel::Off,
        LEVEL_DEBUG => DiagnosticLevel::Debug,
        _ => DiagnosticLevel::Error,
    }
}

/// Get the configured diagnostic level (reads the environment on first call,
/// caches thereafter).
#[must_use]
pub fn diagnostic_level() -> DiagnosticLevel {
    let cached = CACHED_LEVEL.load(Ordering::Relaxed);

    if cached != LEVEL_UNRESOLVED && cached != LEVEL_RESOLVING {
        return u8_to_level(cached);
    }
    if cached == LEVEL_RESOLVING {
        return DiagnosticLevel::default();
    }

    if CACHED_LEVEL
        .compare_exchange(
            LEVEL_UNRESOLVED,
            LEVEL_RESOLVING,
            Ordering::SeqCst,
            Ordering::Relaxed,
        )
        .is_err()
    {
        let now = CACHED_LEVEL.load(Ordering::Acquire);
        return if now == LEVEL_RESOLVING || now == LEVEL_UNRESOLVED {
            DiagnosticLevel::default()
        } else {
            u8_to_level(now)
        };
    }

    let level = std::env::var(DIAGNOSTICS_ENV)
        .map(|raw| DiagnosticLevel::from_str_loose(&raw))
        .unwrap_or_default();
    CACHED_LEVEL.store(level_to_u8(level), Ordering::Release);
    level
}

/// Override the cached level, bypassing the environment.
pub fn set_diagnostic_level(level: DiagnosticLevel) {
    CACHED_LEVEL.store(level_to_u8(level), Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!(DiagnosticLevel::from_str_loose("off"), DiagnosticLevel::Off);
        assert_eq!(DiagnosticLevel::from_str_loose("QUIET"), DiagnosticLevel::Off);
        assert_eq!(DiagnosticLevel::from_str_loose(" Debug "), DiagnosticLevel::Debug);
        assert_eq!(DiagnosticLevel::from_str_loose("trace"), DiagnosticLevel::Debug);
        assert_eq!(DiagnosticLevel::from_str_loose("error"), DiagnosticLevel::Error);
    }

    #[test]
    fn unknown_values_fall_back_to_default() {
        assert_eq!(DiagnosticLevel::from_str_loose(""), DiagnosticLevel::Error);
        assert_eq!(DiagnosticLevel::from_str_loose("loud"), DiagnosticLevel::Error);
    }

    #[test]
    fn level_predicates() {
        assert!(!DiagnosticLevel::Off.reports_failures());
        assert!(DiagnosticLevel::Error.reports_failures());
        assert!(!DiagnosticLevel::Error.reports_success());
        assert!(DiagnosticLevel::Debug.reports_success());
    }

    #[test]
    fn override_is_observed() {
        set_diagnostic_level(DiagnosticLevel::Debug);
        assert_eq!(diagnostic_level(), DiagnosticLevel::Debug);
        set_diagnostic_level(DiagnosticLevel::Error);
        assert_eq!(diagnostic_level(), DiagnosticLevel::Error);
    }

    #[test]
    fn as_str_round_trips() {
        for level in [DiagnosticLevel::Off, DiagnosticLevel::Error, DiagnosticLevel::Debug] {
            assert_eq!(DiagnosticLevel::from_str_loose(level.as_str()), level);
        }
    }
}
