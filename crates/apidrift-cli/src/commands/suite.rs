//! Suite compare command

use anyhow::Context;
use apidrift_client::{Comparator, EndpointSpec};
use apidrift_core::report;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use super::{resolve_config, Outcome};

#[derive(Debug, Args)]
pub struct SuiteArgs {
    /// Path to a JSON file holding an array of endpoint specs
    pub endpoints: PathBuf,

    /// Baseline base URL (falls back to APIDRIFT_BASELINE_URL)
    #[arg(long)]
    pub baseline: Option<String>,

    /// Candidate base URL (falls back to APIDRIFT_CANDIDATE_URL)
    #[arg(long)]
    pub candidate: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Max endpoints compared concurrently
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Whole-suite deadline in milliseconds; endpoints still in flight
    /// when it expires are dropped from the summary
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// Emit the structured summary as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: SuiteArgs) -> anyhow::Result<Outcome> {
    let mut config = resolve_config(args.baseline, args.candidate, args.timeout_ms)?;
    if let Some(n) = args.max_concurrency {
        config = config.with_max_concurrency(n);
    }
    if let Some(ms) = args.deadline_ms {
        config = config.with_suite_deadline(Duration::from_millis(ms));
    }

    let raw = std::fs::read_to_string(&args.endpoints)
        .with_context(|| format!("reading {}", args.endpoints.display()))?;
    let specs: Vec<EndpointSpec> =
        serde_json::from_str(&raw).context("endpoints file must be a JSON array of endpoint specs")?;

    let comparator = Comparator::new(config)?;
    let summary = comparator.compare_suite(&specs).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::render_summary(&summary));
    }

    Ok(if summary.regressions_found > 0 {
        Outcome::RegressionsFound
    } else {
        Outcome::Clean
    })
}
