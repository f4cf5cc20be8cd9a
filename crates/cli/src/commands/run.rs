//! Run Command

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use cachetest_harness::select::validate_unique_ids;
use cachetest_harness::{
    classify, select, Executor, HarnessConfig, HttpTransport, ResultSet, Suite, SuiteRunner,
    TestIndex,
};

use crate::output::{print_comparison, print_error, print_run_summary, print_success, OutputFormat};

#[derive(Args)]
pub struct RunArgs {
    /// File to write this run's results to
    pub output: PathBuf,

    /// Run only this test case and print every exchange
    pub test_id: Option<String>,

    /// Baseline results to compare against (overrides the configuration file)
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Write results without comparing them to the baseline
    #[arg(long)]
    pub no_compare: bool,
}

/// Returns whether the run is free of regressions
pub async fn execute(args: RunArgs, config: HarnessConfig, format: OutputFormat) -> Result<bool> {
    let suites = Suite::compose(&config.fixtures).context("loading fixtures")?;
    validate_unique_ids(&suites)?;
    let index = TestIndex::from_suites(&suites);
    let selected = select(suites, args.test_id.as_deref())?;

    // Read the baseline before touching the network so a malformed file aborts the run
    let baseline = if args.no_compare {
        None
    } else {
        let path = args.baseline.unwrap_or_else(|| config.baseline.clone());
        Some(ResultSet::load_or_empty(&path)?)
    };

    let transport = HttpTransport::new(config.request_timeout())?;
    let executor =
        Executor::new(transport, &config.base_url)?.with_default_pause(config.default_pause());
    let summary = SuiteRunner::new(executor).run(&selected).await?;

    summary.results.write(&args.output)?;
    print_run_summary(&summary, format);

    let Some(baseline) = baseline else {
        info!("Skipping baseline comparison");
        return Ok(true);
    };

    let comparison = classify(&summary.results, &baseline, &index, &config.report);
    print_comparison(&comparison, format);

    if comparison.is_success() {
        print_success("No regressions");
        Ok(true)
    } else {
        print_error("TEST REGRESSIONS ENCOUNTERED");
        Ok(false)
    }
}
