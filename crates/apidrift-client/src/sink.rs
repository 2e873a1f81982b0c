//! Optional persistence seam for comparison history.
//!
//! A [`ResultSink`] receives each completed [`ComparisonResult`]. Persistence
//! is advisory: a failing sink is logged and the comparison result is still
//! returned to the caller.

use apidrift_core::{ComparisonResult, DriftError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Receives completed comparison results for out-of-band storage.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn persist(&self, result: &ComparisonResult) -> Result<(), DriftError>;
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NoopSink;

#[async_trait]
impl ResultSink for NoopSink {
    async fn persist(&self, _result: &ComparisonResult) -> Result<(), DriftError> {
        Ok(())
    }
}

/// In-memory sink, mainly for tests and ad-hoc inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    results: Mutex<Vec<ComparisonResult>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything persisted so far, in arrival order.
    pub fn recorded(&self) -> Vec<ComparisonResult> {
        self.results
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn persist(&self, result: &ComparisonResult) -> Result<(), DriftError> {
        if let Ok(mut guard) = self.results.lock() {
            guard.push(result.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidrift_core::{RegressionSeverity, RiskCounts};
    use chrono::Utc;
    use serde_json::json;

    fn sample() -> ComparisonResult {
        ComparisonResult {
            endpoint: "/items".to_string(),
            method: "GET".to_string(),
            baseline_response: json!({}),
            candidate_response: json!({}),
            baseline_error: None,
            candidate_error: None,
            differences: Vec::new(),
            is_regression: false,
            regression_severity: RegressionSeverity::None,
            risk_counts: RiskCounts::default(),
            baseline_elapsed_ms: 1.0,
            candidate_elapsed_ms: 1.0,
            captured_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        let mut a = sample();
        a.endpoint = "/a".to_string();
        let mut b = sample();
        b.endpoint = "/b".to_string();
        sink.persist(&a).await.unwrap();
        sink.persist(&b).await.unwrap();
        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].endpoint, "/a");
        assert_eq!(recorded[1].endpoint, "/b");
    }

    #[tokio::test]
    async fn test_noop_sink_accepts_everything() {
        let sink = NoopSink;
        sink.persist(&sample()).await.unwrap();
    }
}
