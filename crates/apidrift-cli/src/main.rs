//! apidrift CLI
//!
//! Command-line interface for comparing API responses between a baseline
//! and a candidate deployment.

use apidrift_core::logging_facility::{self, Profile};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "apidrift")]
#[command(about = "apidrift - API response regression comparison", long_about = None)]
struct Cli {
    /// Logging profile: development, production, or test
    #[arg(long, global = true, default_value = "development")]
    log_profile: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare one endpoint across the two targets
    Compare(commands::compare::CompareArgs),
    /// Compare a suite of endpoints and report fleet health
    Suite(commands::suite::SuiteArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging_facility::init(match cli.log_profile.as_str() {
        "production" => Profile::Production,
        "test" => Profile::Test,
        _ => Profile::Development,
    });

    let outcome = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args).await,
        Commands::Suite(args) => commands::suite::execute(args).await,
    };

    match outcome {
        Ok(commands::Outcome::Clean) => ExitCode::SUCCESS,
        // Regressions are a distinct exit code so CI can gate on them.
        Ok(commands::Outcome::RegressionsFound) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
