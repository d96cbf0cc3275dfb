//! Conformance testing harness for fixturefs.
//!
//! This crate provides:
//! - Fixture sets: JSON descriptions of a scratch filesystem plus the expected
//!   result of listing or reading one path in it
//! - A runner that materializes each case in a temporary directory and
//!   verifies the core contract
//! - Report generation: markdown for humans, JSONL run logs for machines
//! - The export table dump used to check host-side declarations

#![forbid(unsafe_code)]

pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;

pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet, Operation};
pub use report::{ConformanceReport, VerificationResult};
pub use runner::TestRunner;
