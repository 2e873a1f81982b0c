//! Comparison outcome types.
//!
//! [`ComparisonResult`] is one endpoint's outcome; [`RegressionSummary`]
//! folds a suite of results into a fleet-level health report. Both are
//! created once and never mutated in place after being returned.

use crate::classify::{RegressionSeverity, RiskCounts};
use crate::diff::model::DifferenceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One endpoint comparison outcome, owned by the caller that requested it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    /// Endpoint path, e.g. `/items`
    pub endpoint: String,
    /// HTTP method as an uppercase string, e.g. `GET`
    pub method: String,
    /// Baseline response document (best-effort parsed on error)
    pub baseline_response: Value,
    /// Candidate response document (best-effort parsed on error)
    pub candidate_response: Value,
    /// Baseline-side transport/status/parse error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_error: Option<String>,
    /// Candidate-side transport/status/parse error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_error: Option<String>,
    /// Ordered difference records, including any appended error record
    pub differences: Vec<DifferenceRecord>,
    /// True if the differences constitute a regression
    pub is_regression: bool,
    /// Aggregate severity of the regression
    pub regression_severity: RegressionSeverity,
    /// Unexpected-difference tallies by severity
    pub risk_counts: RiskCounts,
    /// Wall-clock latency of the baseline call, milliseconds
    pub baseline_elapsed_ms: f64,
    /// Wall-clock latency of the candidate call, milliseconds
    pub candidate_elapsed_ms: f64,
    /// When this comparison was captured
    pub captured_at: DateTime<Utc>,
}

/// Fleet-level health summary over N comparison results.
///
/// `health_score` is a coarse 0-100 linear signal
/// (`max(0, 100 - 20*regressions - 10*warnings)`), not a calibrated
/// probability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegressionSummary {
    pub total_endpoints_tested: u32,
    pub regressions_found: u32,
    pub critical_regressions: u32,
    /// Results with severity medium or high
    pub warnings: u32,
    pub health_score: u32,
    /// Per-endpoint results in input order
    pub results: Vec<ComparisonResult>,
}

impl RegressionSummary {
    /// Fold completed results (in input order) into a summary.
    pub fn from_results(results: Vec<ComparisonResult>) -> Self {
        let total_endpoints_tested = results.len() as u32;
        let regressions_found = results.iter().filter(|r| r.is_regression).count() as u32;
        let critical_regressions = results
            .iter()
            .filter(|r| r.regression_severity == RegressionSeverity::Critical)
            .count() as u32;
        let warnings = results
            .iter()
            .filter(|r| {
                matches!(
                    r.regression_severity,
                    RegressionSeverity::Medium | RegressionSeverity::High
                )
            })
            .count() as u32;
        let health_score =
            (100i64 - 20 * i64::from(regressions_found) - 10 * i64::from(warnings)).max(0) as u32;
        Self {
            total_endpoints_tested,
            regressions_found,
            critical_regressions,
            warnings,
            health_score,
            results,
        }
    }
}
