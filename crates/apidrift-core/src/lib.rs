//! apidrift core - pure comparison kernel
//!
//! This crate provides the side-effect-free heart of the harness:
//! - A closed document tag ([`DocKind`]) over JSON trees
//! - The structural differ ([`compute_diff`]) producing ordered, typed
//!   difference records
//! - The expected-difference heuristics (generated IDs, timestamps,
//!   clock-skew) in [`expected`]
//! - The regression classifier turning a difference list into a verdict
//! - Aggregate outcome types ([`ComparisonResult`], [`RegressionSummary`])
//!   and their deterministic Markdown rendering
//!
//! Nothing here performs I/O; the `apidrift-client` crate drives the paired
//! requests and feeds the responses through this kernel.

pub mod classify;
pub mod diff;
pub mod document;
pub mod errors;
pub mod expected;
pub mod logging_facility;
pub mod outcome;
pub mod report;

// Re-export commonly used types
pub use classify::{classify, risk_counts, RegressionSeverity, RiskCounts, Verdict};
pub use diff::engine::compute_diff;
pub use diff::model::{DifferenceKind, DifferenceRecord, Severity};
pub use document::DocKind;
pub use errors::{DriftError, DriftErrorKind, Result};
pub use outcome::{ComparisonResult, RegressionSummary};
