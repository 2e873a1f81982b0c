//! Single-endpoint comparison orchestration.
//!
//! [`Comparator::compare`] issues the same request to the baseline and
//! candidate targets concurrently, measures each side's wall-clock latency,
//! and runs the responses through the structural diff and the regression
//! classifier. A failure on one side (transport, non-2xx status, unparseable
//! body) never aborts the comparison: it is absorbed into the result as a
//! `response_error` difference record so error-shaped drift is classified
//! like any other drift.

use apidrift_core::{
    classify, compute_diff, risk_counts, ComparisonResult, DifferenceKind, DifferenceRecord,
    DriftError, DriftErrorKind, Severity,
};
use apidrift_core_types::ComparisonId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{normalize_base_url, CompareConfig};
use crate::method::Method;
use crate::sink::ResultSink;

/// One endpoint to compare across the two targets.
///
/// The same method, payload, and query parameters are sent to both sides.
/// Per-spec base overrides allow a single suite to mix targets (e.g. pin
/// one endpoint to a different candidate build).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Path relative to the base URL, always with a leading slash
    pub endpoint: String,
    pub method: Method,
    /// JSON body, sent only for methods that take one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Query parameters, applied to both sides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
    /// Override for the configured baseline base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_base: Option<String>,
    /// Override for the configured candidate base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_base: Option<String>,
}

impl EndpointSpec {
    /// Create a spec from a path and a method name.
    ///
    /// Returns `ERR_UNSUPPORTED_METHOD` for anything outside
    /// GET/POST/PUT/DELETE.
    pub fn new(endpoint: impl Into<String>, method: &str) -> Result<Self, DriftError> {
        let method = method.parse::<Method>()?;
        Ok(Self::with_method(endpoint, method))
    }

    pub fn with_method(endpoint: impl Into<String>, method: Method) -> Self {
        let raw = endpoint.into();
        let endpoint = if raw.starts_with('/') {
            raw
        } else {
            format!("/{raw}")
        };
        Self {
            endpoint,
            method,
            payload: None,
            params: None,
            baseline_base: None,
            candidate_base: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_baseline_base(mut self, base: impl Into<String>) -> Self {
        self.baseline_base = Some(base.into());
        self
    }

    pub fn with_candidate_base(mut self, base: impl Into<String>) -> Self {
        self.candidate_base = Some(base.into());
        self
    }
}

/// One side's fetch outcome. Always produced, even on failure.
pub(crate) struct SideOutcome {
    pub(crate) document: Value,
    pub(crate) error: Option<String>,
    pub(crate) elapsed_ms: f64,
}

/// Degraded-side descriptions. These become `response_error` strings, not
/// `DriftError`s: the comparison still completes.
#[derive(Debug, thiserror::Error)]
enum SideFailure {
    #[error("{side} request failed: {detail}")]
    Transport { side: &'static str, detail: String },
    #[error("{side} returned HTTP {status}: {snippet}")]
    Status {
        side: &'static str,
        status: u16,
        snippet: String,
    },
    #[error("{side} returned unparseable JSON: {detail}")]
    Parse { side: &'static str, detail: String },
}

/// Drives paired requests and owns the HTTP client and target configuration.
pub struct Comparator {
    pub(crate) client: reqwest::Client,
    pub(crate) config: CompareConfig,
    pub(crate) sink: Option<Arc<dyn ResultSink>>,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> Result<Self, DriftError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                DriftError::new(DriftErrorKind::Internal)
                    .with_op("build_client")
                    .with_message(format!("failed to build http client: {e}"))
            })?;
        Ok(Self {
            client,
            config,
            sink: None,
        })
    }

    /// Attach a history sink. Persistence failures are logged, never fatal.
    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare one endpoint across the baseline and candidate targets.
    ///
    /// Errs only on pre-I/O rejection (an invalid per-spec base override).
    /// Target-side failures are absorbed into the returned result.
    pub async fn compare(&self, spec: &EndpointSpec) -> Result<ComparisonResult, DriftError> {
        let comparison_id = ComparisonId::new();
        let baseline_url = self.resolve_url(
            spec.baseline_base.as_deref(),
            &self.config.baseline_base_url,
            spec,
            "baseline",
            &comparison_id,
        )?;
        let candidate_url = self.resolve_url(
            spec.candidate_base.as_deref(),
            &self.config.candidate_base_url,
            spec,
            "candidate",
            &comparison_id,
        )?;

        tracing::debug!(
            comparison_id = %comparison_id,
            endpoint = %spec.endpoint,
            method = %spec.method,
            "comparing endpoint"
        );

        let (baseline, candidate) = tokio::join!(
            self.fetch_side("baseline", &baseline_url, spec),
            self.fetch_side("candidate", &candidate_url, spec),
        );

        let mut differences = compute_diff(&baseline.document, &candidate.document);
        if let Some(record) = error_record(&baseline, &candidate) {
            differences.push(record);
        }

        let verdict = classify(&differences);
        let risk = risk_counts(&differences);
        if verdict.is_regression {
            tracing::info!(
                comparison_id = %comparison_id,
                endpoint = %spec.endpoint,
                severity = ?verdict.severity,
                differences = differences.len(),
                "regression detected"
            );
        }

        let result = ComparisonResult {
            endpoint: spec.endpoint.clone(),
            method: spec.method.to_string(),
            baseline_response: baseline.document,
            candidate_response: candidate.document,
            baseline_error: baseline.error,
            candidate_error: candidate.error,
            differences,
            is_regression: verdict.is_regression,
            regression_severity: verdict.severity,
            risk_counts: risk,
            baseline_elapsed_ms: baseline.elapsed_ms,
            candidate_elapsed_ms: candidate.elapsed_ms,
            captured_at: Utc::now(),
        };

        if let Some(sink) = &self.sink {
            if let Err(error) = sink.persist(&result).await {
                tracing::warn!(
                    comparison_id = %comparison_id,
                    endpoint = %spec.endpoint,
                    %error,
                    "result sink rejected write"
                );
            }
        }

        Ok(result)
    }

    fn resolve_url(
        &self,
        override_base: Option<&str>,
        configured_base: &str,
        spec: &EndpointSpec,
        role: &str,
        comparison_id: &ComparisonId,
    ) -> Result<String, DriftError> {
        let base = match override_base {
            // Configured bases are validated at construction; overrides are
            // validated here, per call.
            Some(raw) => normalize_base_url(raw.to_string(), role).map_err(|e| {
                e.with_op("compare")
                    .with_endpoint(spec.endpoint.clone())
                    .with_method(spec.method.as_str())
                    .with_comparison_id(comparison_id.clone())
            })?,
            None => configured_base.to_string(),
        };
        Ok(format!("{}{}", base, spec.endpoint))
    }

    /// Fetch one side. Never fails: degraded outcomes carry an error string
    /// and a placeholder document.
    async fn fetch_side(&self, side: &'static str, url: &str, spec: &EndpointSpec) -> SideOutcome {
        let mut request = self.client.request(spec.method.as_reqwest(), url);
        if let Some(params) = &spec.params {
            request = request.query(params);
        }
        if spec.method.takes_body() {
            if let Some(payload) = &spec.payload {
                request = request.json(payload);
            }
        }

        let started = Instant::now();
        let (document, error) = match request.send().await {
            Err(e) => degraded(SideFailure::Transport {
                side,
                detail: e.to_string(),
            }),
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Err(e) => degraded(SideFailure::Transport {
                        side,
                        detail: e.to_string(),
                    }),
                    Ok(body) if status.is_success() => match serde_json::from_str::<Value>(&body) {
                        Ok(document) => (document, None),
                        Err(e) => degraded(SideFailure::Parse {
                            side,
                            detail: e.to_string(),
                        }),
                    },
                    Ok(body) => {
                        let message = SideFailure::Status {
                            side,
                            status: status.as_u16(),
                            snippet: snippet(&body),
                        }
                        .to_string();
                        // Keep the error body if it parses; structured error
                        // payloads still diff meaningfully.
                        let document = serde_json::from_str::<Value>(&body)
                            .unwrap_or_else(|_| json!({ "error": message.clone() }));
                        (document, Some(message))
                    }
                }
            }
        };
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        if let Some(error) = &error {
            tracing::debug!(side, url, %error, "side call degraded");
        }
        SideOutcome {
            document,
            error,
            elapsed_ms,
        }
    }
}

fn degraded(failure: SideFailure) -> (Value, Option<String>) {
    let message = failure.to_string();
    (json!({ "error": message.clone() }), Some(message))
}

/// First line of a body, capped for log and record hygiene.
fn snippet(body: &str) -> String {
    let line = body.lines().next().unwrap_or("");
    line.chars().take(120).collect()
}

/// Build the `response_error` record for degraded sides, if any.
pub(crate) fn error_record(
    baseline: &SideOutcome,
    candidate: &SideOutcome,
) -> Option<DifferenceRecord> {
    let (kind, left, right) = match (&baseline.error, &candidate.error) {
        (None, None) => return None,
        (Some(b), None) => (DifferenceKind::LeftError, b.clone(), "success".to_string()),
        (None, Some(c)) => (DifferenceKind::RightError, "success".to_string(), c.clone()),
        (Some(b), Some(c)) => (DifferenceKind::BothErrors, b.clone(), c.clone()),
    };
    Some(DifferenceRecord {
        path: "response_error".to_string(),
        kind,
        left_value: Some(Value::String(left)),
        right_value: Some(Value::String(right)),
        left_type: None,
        right_type: None,
        severity: Severity::High,
        is_expected: false,
    })
}
