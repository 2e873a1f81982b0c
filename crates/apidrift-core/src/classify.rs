//! Regression classification.
//!
//! Turns a difference list into a regression verdict and an aggregate
//! severity. The policy is an ordered rule table evaluated top-to-bottom,
//! kept in one place so each rule is testable in isolation.

use crate::diff::model::{DifferenceKind, DifferenceRecord, Severity};
use serde::{Deserialize, Serialize};

/// Aggregate severity of one endpoint comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RegressionSeverity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

/// Regression verdict for one difference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_regression: bool,
    pub severity: RegressionSeverity,
}

/// Unexpected-difference tallies by severity, reported per endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCounts {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

/// Kinds whose presence among regression records escalates the aggregate
/// severity: structural loss, contract break, candidate-side failure.
const CRITICAL_KINDS: &[DifferenceKind] = &[
    DifferenceKind::MissingInRight,
    DifferenceKind::TypeMismatch,
    DifferenceKind::RightError,
];

/// Per-record regression predicate, first match wins:
/// 1. structural kinds (type mismatch, field lost in candidate) regress;
/// 2. any transport/parse error difference regresses;
/// 3. a value mismatch regresses only when the two sides' types differ
///    (same-type value drift is tolerable data variance, not a contract
///    break);
/// 4. a field new in the candidate never regresses (additive change);
/// 5. anything else regresses iff its severity is high.
fn is_regression_record(record: &DifferenceRecord) -> bool {
    match record.kind {
        DifferenceKind::TypeMismatch | DifferenceKind::MissingInRight => true,
        DifferenceKind::LeftError | DifferenceKind::RightError | DifferenceKind::BothErrors => {
            true
        }
        DifferenceKind::ValueMismatch => match (record.left_type, record.right_type) {
            (Some(left), Some(right)) => left != right,
            // Missing type information: be conservative.
            _ => true,
        },
        DifferenceKind::MissingInLeft => false,
    }
}

/// Classify a difference list into a regression verdict.
///
/// Expected differences are discarded first; the verdict is computed over
/// the remainder. The function is total: any well-formed record list yields
/// a verdict, never an error.
pub fn classify(records: &[DifferenceRecord]) -> Verdict {
    let unexpected: Vec<&DifferenceRecord> =
        records.iter().filter(|r| !r.is_expected).collect();
    if unexpected.is_empty() {
        return Verdict {
            is_regression: false,
            severity: RegressionSeverity::None,
        };
    }

    let regression_records: Vec<&DifferenceRecord> = unexpected
        .into_iter()
        .filter(|r| is_regression_record(r))
        .collect();
    if regression_records.is_empty() {
        return Verdict {
            is_regression: false,
            severity: RegressionSeverity::None,
        };
    }

    let high_count = regression_records
        .iter()
        .filter(|r| r.severity == Severity::High)
        .count();
    let medium_count = regression_records
        .iter()
        .filter(|r| r.severity == Severity::Medium)
        .count();
    let critical_count = regression_records
        .iter()
        .filter(|r| CRITICAL_KINDS.contains(&r.kind))
        .count();

    let severity = if critical_count > 0 || high_count > 0 {
        if critical_count > 2 || high_count > 3 {
            RegressionSeverity::Critical
        } else {
            RegressionSeverity::High
        }
    } else if medium_count > 0 {
        if medium_count > 3 {
            RegressionSeverity::Medium
        } else {
            RegressionSeverity::Low
        }
    } else {
        RegressionSeverity::Low
    };

    Verdict {
        is_regression: true,
        severity,
    }
}

/// Tally unexpected records by severity. Expected differences are skipped,
/// matching what the verdict is computed over.
pub fn risk_counts(records: &[DifferenceRecord]) -> RiskCounts {
    let mut counts = RiskCounts::default();
    for record in records.iter().filter(|r| !r.is_expected) {
        match record.severity {
            Severity::High => counts.high += 1,
            Severity::Medium => counts.medium += 1,
            Severity::Low => counts.low += 1,
        }
    }
    counts
}
