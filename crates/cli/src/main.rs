//! cachetest CLI - Main Entry Point
//!
//! Runs HTTP cache conformance suites against a cache and compares the
//! results with a stored baseline. Exits non-zero on regressions and on
//! configuration errors.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cachetest_harness::HarnessConfig;

mod commands;
mod output;

use commands::{compare, run};

/// cachetest - HTTP cache conformance harness
#[derive(Parser)]
#[command(name = "cachetest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "cachetest.toml", global = true, env = "CACHETEST_CONFIG")]
    config: PathBuf,

    /// Base URL of the cache under test (overrides the configuration file)
    #[arg(long, global = true, env = "CACHETEST_BASE_URL")]
    base_url: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the suites against the cache and compare with the baseline
    Run(run::RunArgs),

    /// Compare two result files
    Compare(compare::CompareArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    match dispatch(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<bool> {
    let mut config = HarnessConfig::load(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    match cli.command {
        Commands::Run(args) => run::execute(args, config, cli.format).await,
        Commands::Compare(args) => compare::execute(args, config, cli.format),
    }
}
