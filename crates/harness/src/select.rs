//! Narrowing a run down to one test case

use std::collections::HashSet;
use tracing::info;

use crate::error::{HarnessError, HarnessResult};
use crate::scenario::Suite;

/// Return the suites to run.
///
/// Without a test id every suite is returned unchanged. With one, the result
/// is a single suite holding only that test case, marked for dumping. An id
/// that matches nothing is an error.
pub fn select(suites: Vec<Suite>, test_id: Option<&str>) -> HarnessResult<Vec<Suite>> {
    let Some(test_id) = test_id else {
        return Ok(suites);
    };

    for mut suite in suites {
        let found = suite.tests.iter().position(|t| t.id == test_id);
        if let Some(pos) = found {
            let mut test = suite.tests.swap_remove(pos);
            info!("Selected {} from suite {}", test.id, suite.id);
            test.dump = true;
            return Ok(vec![Suite {
                tests: vec![test],
                ..suite
            }]);
        }
    }

    Err(HarnessError::UnknownTest(test_id.to_string()))
}

/// Reject suite lists where a test id appears more than once
pub fn validate_unique_ids(suites: &[Suite]) -> HarnessResult<()> {
    let mut seen = HashSet::new();
    for test in suites.iter().flat_map(|s| s.tests.iter()) {
        if !seen.insert(test.id.as_str()) {
            return Err(HarnessError::DuplicateTestId(test.id.clone()));
        }
    }
    Ok(())
}
