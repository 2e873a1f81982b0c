//! Suite-level comparison with bounded parallelism.
//!
//! Runs every [`EndpointSpec`] through [`Comparator::compare`] with at most
//! `max_concurrency` comparisons in flight, re-slots completions back into
//! input order, and folds the results into a [`RegressionSummary`]. An
//! optional suite deadline returns whatever completed in time; endpoints
//! still in flight are dropped and do not count as tested.

use apidrift_core::{
    classify, risk_counts, ComparisonResult, DifferenceKind, DifferenceRecord, DriftError,
    RegressionSummary, Severity,
};
use apidrift_core_types::RunId;
use chrono::Utc;
use futures::StreamExt;
use serde_json::{json, Value};

use crate::orchestrator::{Comparator, EndpointSpec};

impl Comparator {
    /// Compare every spec and fold the outcomes into a summary.
    ///
    /// Infallible by construction: a spec whose comparison is rejected
    /// before I/O (e.g. a bad base override) contributes a failed result
    /// rather than aborting the suite.
    pub async fn compare_suite(&self, specs: &[EndpointSpec]) -> RegressionSummary {
        let run_id = RunId::new();
        tracing::info!(
            run_id = %run_id,
            endpoints = specs.len(),
            max_concurrency = self.config.max_concurrency,
            "starting comparison suite"
        );

        let deadline = self
            .config
            .suite_deadline
            .map(|d| tokio::time::Instant::now() + d);

        let mut slots: Vec<Option<ComparisonResult>> = specs.iter().map(|_| None).collect();
        {
            let mut inflight = futures::stream::iter(specs.iter().enumerate())
                .map(|(index, spec)| async move { (index, spec, self.compare(spec).await) })
                .buffer_unordered(self.config.max_concurrency.max(1));

            loop {
                let next = match deadline {
                    None => inflight.next().await,
                    Some(at) => match tokio::time::timeout_at(at, inflight.next()).await {
                        Ok(item) => item,
                        Err(_) => {
                            tracing::warn!(
                                run_id = %run_id,
                                completed = slots.iter().filter(|s| s.is_some()).count(),
                                "suite deadline reached, returning partial results"
                            );
                            break;
                        }
                    },
                };
                let Some((index, spec, outcome)) = next else {
                    break;
                };
                let result = match outcome {
                    Ok(result) => result,
                    Err(error) => {
                        let error = error.with_run_id(run_id.clone());
                        tracing::warn!(
                            run_id = %run_id,
                            endpoint = %spec.endpoint,
                            %error,
                            "comparison rejected, recording as failed"
                        );
                        failed_comparison(spec, &error)
                    }
                };
                slots[index] = Some(result);
            }
        }

        let results: Vec<ComparisonResult> = slots.into_iter().flatten().collect();
        let summary = RegressionSummary::from_results(results);
        tracing::info!(
            run_id = %run_id,
            endpoints = summary.total_endpoints_tested,
            regressions = summary.regressions_found,
            health_score = summary.health_score,
            "comparison suite complete"
        );
        summary
    }
}

/// Synthesize a result for a comparison that could not run at all.
///
/// Both sides carry the rejection message and a single `both_errors`
/// record drives the classifier, so the endpoint still counts against
/// the health score.
fn failed_comparison(spec: &EndpointSpec, error: &DriftError) -> ComparisonResult {
    let message = error.to_string();
    let differences = vec![DifferenceRecord {
        path: "response_error".to_string(),
        kind: DifferenceKind::BothErrors,
        left_value: Some(Value::String(message.clone())),
        right_value: Some(Value::String(message.clone())),
        left_type: None,
        right_type: None,
        severity: Severity::High,
        is_expected: false,
    }];
    let verdict = classify(&differences);
    let risk = risk_counts(&differences);
    ComparisonResult {
        endpoint: spec.endpoint.clone(),
        method: spec.method.to_string(),
        baseline_response: json!({}),
        candidate_response: json!({}),
        baseline_error: Some(message.clone()),
        candidate_error: Some(message),
        differences,
        is_regression: verdict.is_regression,
        regression_severity: verdict.severity,
        risk_counts: risk,
        baseline_elapsed_ms: 0.0,
        candidate_elapsed_ms: 0.0,
        captured_at: Utc::now(),
    }
}
