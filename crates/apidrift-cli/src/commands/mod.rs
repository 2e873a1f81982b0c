//! Command implementations and shared argument plumbing.

use anyhow::Context;
use apidrift_client::config::{self, CompareConfig};
use std::collections::BTreeMap;
use std::time::Duration;

pub mod compare;
pub mod suite;

/// Whether a command observed any regression, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    RegressionsFound,
}

/// Build the comparison config from flags, falling back to `APIDRIFT_*`
/// environment variables for anything not given on the command line.
pub(crate) fn resolve_config(
    baseline: Option<String>,
    candidate: Option<String>,
    timeout_ms: Option<u64>,
) -> anyhow::Result<CompareConfig> {
    let baseline = resolve_base(baseline, config::ENV_BASELINE_URL, "baseline")?;
    let candidate = resolve_base(candidate, config::ENV_CANDIDATE_URL, "candidate")?;
    let mut cfg = CompareConfig::new(baseline, candidate)?;
    if let Some(ms) = timeout_ms {
        cfg = cfg.with_request_timeout(Duration::from_millis(ms));
    } else if let Ok(raw) = std::env::var(config::ENV_TIMEOUT_MS) {
        let ms: u64 = raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be an integer", config::ENV_TIMEOUT_MS))?;
        cfg = cfg.with_request_timeout(Duration::from_millis(ms));
    }
    Ok(cfg)
}

fn resolve_base(flag: Option<String>, env_name: &str, role: &str) -> anyhow::Result<String> {
    flag.or_else(|| std::env::var(env_name).ok())
        .with_context(|| format!("{role} base url missing: pass --{role} or set {env_name}"))
}

/// Parse repeated `KEY=VALUE` pairs into query parameters.
pub(crate) fn parse_params(raw: &[String]) -> anyhow::Result<BTreeMap<String, String>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .with_context(|| format!("parameter `{pair}` is not KEY=VALUE"))
        })
        .collect()
}
