//! Suite runner - executes selected suites one test case at a time

use std::time::Instant;
use tracing::{debug, error, info};

use crate::error::HarnessResult;
use crate::executor::Executor;
use crate::results::{Outcome, ResultSet};
use crate::scenario::Suite;
use crate::transport::Transport;

/// Result of running a list of suites
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub results: ResultSet,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Failures caused by the transport rather than the cache
    pub harness_errors: usize,
    pub duration_ms: u64,
}

/// Runs test cases strictly one after another so that cache state from
/// one case never overlaps another's grading
pub struct SuiteRunner<T> {
    executor: Executor<T>,
}

impl<T: Transport> SuiteRunner<T> {
    pub fn new(executor: Executor<T>) -> Self {
        Self { executor }
    }

    /// Run every test case of every suite and collect the outcomes
    pub async fn run(&self, suites: &[Suite]) -> HarnessResult<RunSummary> {
        let start = Instant::now();
        let total: usize = suites.iter().map(|s| s.tests.len()).sum();
        let mut results = ResultSet::new();
        let mut harness_errors = 0;

        info!("Running {} test(s) against {}...", total, self.executor.base_url());

        for suite in suites {
            debug!("Suite: {} ({})", suite.name, suite.id);

            for test in &suite.tests {
                let test_start = Instant::now();
                let execution = self.executor.execute(test).await;
                let duration_ms = test_start.elapsed().as_millis() as u64;

                match &execution.outcome {
                    Outcome::Pass => {
                        info!("✓ {} ({} ms)", test.id, duration_ms);
                    }
                    Outcome::Fail(failure) => {
                        if failure.is_harness_error() {
                            harness_errors += 1;
                        }
                        error!("✗ {} - {}", test.id, failure);
                    }
                }

                results.record(test.id.clone(), execution.outcome)?;
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let passed = results.passed();
        let failed = results.failed();

        info!("");
        info!("Test Results: {} passed, {} failed ({} ms)", passed, failed, duration_ms);

        Ok(RunSummary {
            results,
            total,
            passed,
            failed,
            harness_errors,
            duration_ms,
        })
    }
}
