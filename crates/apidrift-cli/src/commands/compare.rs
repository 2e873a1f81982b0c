//! Single-endpoint compare command

use anyhow::Context;
use apidrift_client::{Comparator, EndpointSpec};
use apidrift_core::report;
use clap::Args;

use super::{parse_params, resolve_config, Outcome};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Endpoint path, e.g. /users/1
    pub endpoint: String,

    /// HTTP method (GET, POST, PUT, DELETE)
    #[arg(long, default_value = "GET")]
    pub method: String,

    /// Baseline base URL (falls back to APIDRIFT_BASELINE_URL)
    #[arg(long)]
    pub baseline: Option<String>,

    /// Candidate base URL (falls back to APIDRIFT_CANDIDATE_URL)
    #[arg(long)]
    pub candidate: Option<String>,

    /// JSON request body, sent for POST/PUT
    #[arg(long)]
    pub payload: Option<String>,

    /// Query parameter as KEY=VALUE, repeatable
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Emit the structured result as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: CompareArgs) -> anyhow::Result<Outcome> {
    let config = resolve_config(args.baseline, args.candidate, args.timeout_ms)?;
    let comparator = Comparator::new(config)?;

    let mut spec = EndpointSpec::new(args.endpoint, &args.method)?;
    if let Some(raw) = args.payload {
        let payload = serde_json::from_str(&raw).context("payload is not valid JSON")?;
        spec = spec.with_payload(payload);
    }
    if !args.params.is_empty() {
        spec = spec.with_params(parse_params(&args.params)?);
    }

    let result = comparator.compare(&spec).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_comparison(&result));
    }

    Ok(if result.is_regression {
        Outcome::RegressionsFound
    } else {
        Outcome::Clean
    })
}
