//! Human-readable summary renderer for comparison outcomes.

use crate::classify::RegressionSeverity;
use crate::diff::model::{DifferenceKind, DifferenceRecord, Severity};
use crate::outcome::{ComparisonResult, RegressionSummary};
use serde_json::Value;

/// Render a human-readable Markdown summary of a [`ComparisonResult`].
///
/// The summary is intended for review workflows and CI logs. It is
/// informational only and does not affect the structured result.
pub fn render_comparison(result: &ComparisonResult) -> String {
    let mut out = String::new();

    out.push_str("## Endpoint Comparison\n\n");
    out.push_str(&format!(
        "**Endpoint**: `{} {}`  \n**Regression**: {}  \n**Severity**: {}\n\n",
        result.method,
        result.endpoint,
        if result.is_regression { "yes" } else { "no" },
        severity_label(result.regression_severity),
    ));

    out.push_str(&format!(
        "**Latency**: baseline {:.1} ms, candidate {:.1} ms  \n**Captured**: {}\n\n",
        result.baseline_elapsed_ms,
        result.candidate_elapsed_ms,
        result.captured_at.to_rfc3339(),
    ));

    if let Some(err) = &result.baseline_error {
        out.push_str(&format!("**Baseline error**: {}\n\n", err));
    }
    if let Some(err) = &result.candidate_error {
        out.push_str(&format!("**Candidate error**: {}\n\n", err));
    }

    if result.differences.is_empty() {
        out.push_str("_No differences detected._\n");
        return out;
    }

    out.push_str("### Differences\n\n");
    out.push_str("| Path | Kind | Severity | Expected | Baseline | Candidate |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    for record in &result.differences {
        out.push_str(&render_record_row(record));
    }

    let unexpected = result.differences.iter().filter(|d| !d.is_expected).count();
    let expected = result.differences.len() - unexpected;
    out.push_str(&format!(
        "\n{} difference(s): {} unexpected, {} expected.\n",
        result.differences.len(),
        unexpected,
        expected
    ));

    out
}

/// Render a human-readable Markdown summary of a [`RegressionSummary`].
pub fn render_summary(summary: &RegressionSummary) -> String {
    let mut out = String::new();

    out.push_str("## Regression Summary\n\n");
    out.push_str(&format!(
        "**Health score**: {}/100  \n**Endpoints tested**: {}  \n\
         **Regressions**: {}  \n**Critical**: {}  \n**Warnings**: {}\n\n",
        summary.health_score,
        summary.total_endpoints_tested,
        summary.regressions_found,
        summary.critical_regressions,
        summary.warnings,
    ));

    if summary.results.is_empty() {
        out.push_str("_No endpoints tested._\n");
        return out;
    }

    out.push_str("### Endpoints\n\n");
    out.push_str("| Endpoint | Regression | Severity | Diffs | Baseline ms | Candidate ms |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    for result in &summary.results {
        out.push_str(&format!(
            "| `{} {}` | {} | {} | {} | {:.1} | {:.1} |\n",
            result.method,
            result.endpoint,
            if result.is_regression { "yes" } else { "no" },
            severity_label(result.regression_severity),
            result.differences.len(),
            result.baseline_elapsed_ms,
            result.candidate_elapsed_ms,
        ));
    }

    out
}

fn render_record_row(record: &DifferenceRecord) -> String {
    format!(
        "| `{}` | {} | {} | {} | {} | {} |\n",
        if record.path.is_empty() {
            "(root)"
        } else {
            &record.path
        },
        kind_label(record.kind),
        match record.severity {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        },
        if record.is_expected { "yes" } else { "no" },
        short_value(record.left_value.as_ref()),
        short_value(record.right_value.as_ref()),
    )
}

fn severity_label(severity: RegressionSeverity) -> &'static str {
    match severity {
        RegressionSeverity::None => "none",
        RegressionSeverity::Low => "low",
        RegressionSeverity::Medium => "medium",
        RegressionSeverity::High => "high",
        RegressionSeverity::Critical => "critical",
    }
}

fn kind_label(kind: DifferenceKind) -> &'static str {
    match kind {
        DifferenceKind::TypeMismatch => "type mismatch",
        DifferenceKind::MissingInLeft => "new in candidate",
        DifferenceKind::MissingInRight => "lost in candidate",
        DifferenceKind::ValueMismatch => "value mismatch",
        DifferenceKind::LeftError => "baseline error",
        DifferenceKind::RightError => "candidate error",
        DifferenceKind::BothErrors => "both sides errored",
    }
}

/// Compact single-line rendering of a value, truncated for table cells.
fn short_value(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return "(none)".to_string();
    };
    let rendered = value.to_string();
    if rendered.chars().count() > 40 {
        let prefix: String = rendered.chars().take(37).collect();
        format!("`{}...`", prefix)
    } else {
        format!("`{}`", rendered)
    }
}
