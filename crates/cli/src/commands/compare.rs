//! Compare Command

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::warn;

use cachetest_harness::{classify, HarnessConfig, ResultSet, Suite, TestIndex};

use crate::output::{print_comparison, print_error, print_success, OutputFormat};

#[derive(Args)]
pub struct CompareArgs {
    /// Results of the current run
    pub current: PathBuf,

    /// Baseline results
    pub baseline: PathBuf,
}

pub fn execute(args: CompareArgs, config: HarnessConfig, format: OutputFormat) -> Result<bool> {
    let current = ResultSet::load(&args.current)?;
    let baseline = ResultSet::load(&args.baseline)?;

    // Test kinds only affect reporting, so unreadable fixtures are not fatal here
    let index = match Suite::compose(&config.fixtures) {
        Ok(suites) => TestIndex::from_suites(&suites),
        Err(e) => {
            warn!("Cannot load fixtures ({}); treating every test as required", e);
            TestIndex::default()
        }
    };

    let comparison = classify(&current, &baseline, &index, &config.report);
    print_comparison(&comparison, format);

    if comparison.is_success() {
        print_success("No regressions");
        Ok(true)
    } else {
        print_error("TEST REGRESSIONS ENCOUNTERED");
        Ok(false)
    }
}
