//! Comparison configuration.
//!
//! Base URLs for the two targets plus the operational knobs of a run.
//! Values come from the builder or from `APIDRIFT_*` environment variables.

use apidrift_core::{DriftError, DriftErrorKind};
use std::time::Duration;

/// Environment variable holding the baseline base URL.
pub const ENV_BASELINE_URL: &str = "APIDRIFT_BASELINE_URL";
/// Environment variable holding the candidate base URL.
pub const ENV_CANDIDATE_URL: &str = "APIDRIFT_CANDIDATE_URL";
/// Environment variable holding the per-request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "APIDRIFT_TIMEOUT_MS";
/// Environment variable holding the suite concurrency bound.
pub const ENV_MAX_CONCURRENCY: &str = "APIDRIFT_MAX_CONCURRENCY";
/// Environment variable holding the whole-suite deadline in milliseconds.
pub const ENV_SUITE_TIMEOUT_MS: &str = "APIDRIFT_SUITE_TIMEOUT_MS";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Configuration for a comparison run.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Baseline target base URL, no trailing slash
    pub baseline_base_url: String,
    /// Candidate target base URL, no trailing slash
    pub candidate_base_url: String,
    /// Per-request timeout applied to each side independently
    pub request_timeout: Duration,
    /// Upper bound on endpoints compared concurrently in a suite
    pub max_concurrency: usize,
    /// Optional wall-clock deadline for a whole suite run
    pub suite_deadline: Option<Duration>,
}

impl CompareConfig {
    /// Create a configuration from the two target base URLs.
    ///
    /// Trailing slashes are trimmed so endpoint paths join cleanly. Returns
    /// `ERR_INVALID_BASE_URL` if either URL does not parse.
    pub fn new(
        baseline_base_url: impl Into<String>,
        candidate_base_url: impl Into<String>,
    ) -> Result<Self, DriftError> {
        let baseline_base_url = normalize_base_url(baseline_base_url.into(), "baseline")?;
        let candidate_base_url = normalize_base_url(candidate_base_url.into(), "candidate")?;
        Ok(Self {
            baseline_base_url,
            candidate_base_url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            suite_deadline: None,
        })
    }

    /// Build a configuration from `APIDRIFT_*` environment variables.
    ///
    /// `APIDRIFT_BASELINE_URL` and `APIDRIFT_CANDIDATE_URL` are required;
    /// the remaining variables fall back to defaults when absent.
    pub fn from_env() -> Result<Self, DriftError> {
        let baseline = require_env(ENV_BASELINE_URL)?;
        let candidate = require_env(ENV_CANDIDATE_URL)?;
        let mut config = Self::new(baseline, candidate)?;

        if let Some(ms) = optional_env_u64(ENV_TIMEOUT_MS)? {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(n) = optional_env_u64(ENV_MAX_CONCURRENCY)? {
            config.max_concurrency = n.max(1) as usize;
        }
        if let Some(ms) = optional_env_u64(ENV_SUITE_TIMEOUT_MS)? {
            config.suite_deadline = Some(Duration::from_millis(ms));
        }
        Ok(config)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_suite_deadline(mut self, deadline: Duration) -> Self {
        self.suite_deadline = Some(deadline);
        self
    }
}

/// Trim trailing slashes and verify the remainder parses as an absolute URL.
pub(crate) fn normalize_base_url(raw: String, role: &str) -> Result<String, DriftError> {
    let trimmed = raw.trim_end_matches('/').to_string();
    reqwest::Url::parse(&trimmed).map_err(|e| {
        DriftError::new(DriftErrorKind::InvalidBaseUrl)
            .with_op("configure")
            .with_message(format!("{role} base url `{trimmed}` is invalid: {e}"))
    })?;
    Ok(trimmed)
}

fn require_env(name: &str) -> Result<String, DriftError> {
    std::env::var(name).map_err(|_| {
        DriftError::new(DriftErrorKind::InvalidInput)
            .with_op("configure")
            .with_message(format!("environment variable {name} is not set"))
    })
}

fn optional_env_u64(name: &str) -> Result<Option<u64>, DriftError> {
    match std::env::var(name) {
        Err(_) => Ok(None),
        Ok(raw) => raw.trim().parse::<u64>().map(Some).map_err(|_| {
            DriftError::new(DriftErrorKind::InvalidInput)
                .with_op("configure")
                .with_message(format!("{name} must be an integer, got `{raw}`"))
        }),
    }
}
