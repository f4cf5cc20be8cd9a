//! Baseline comparison
//!
//! Classifies every test id of a fresh result set against a stored baseline.
//! Only regressions (passed before, failing now) fail a run; everything else
//! is informational.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, warn};

use crate::results::{Failure, Outcome, ResultSet};
use crate::scenario::TestIndex;

/// Change in a test's outcome relative to the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Regression,
    Improvement,
    NewPassing,
    NewFailing,
    UnchangedPassing,
    UnchangedFailing,
}

impl Classification {
    pub const ALL: [Classification; 6] = [
        Classification::Regression,
        Classification::Improvement,
        Classification::NewPassing,
        Classification::NewFailing,
        Classification::UnchangedFailing,
        Classification::UnchangedPassing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Regression => "Regression",
            Classification::Improvement => "Improvement",
            Classification::NewPassing => "New passing test",
            Classification::NewFailing => "New NOT passing test",
            Classification::UnchangedPassing => "Passing test",
            Classification::UnchangedFailing => "Failing conformance test",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify one id from its current and baseline outcomes
pub fn classify_one(current: &Outcome, baseline: Option<&Outcome>) -> Classification {
    match (current.is_pass(), baseline.map(Outcome::is_pass)) {
        (false, Some(true)) => Classification::Regression,
        (false, None) => Classification::NewFailing,
        (false, Some(false)) => Classification::UnchangedFailing,
        (true, Some(false)) => Classification::Improvement,
        (true, None) => Classification::NewPassing,
        (true, Some(true)) => Classification::UnchangedPassing,
    }
}

/// Which tests' unchanged failures are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailingScope {
    /// Only required conformance tests
    #[default]
    Required,
    /// Required and optional tests
    All,
}

/// Which tests' regressions fail the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateScope {
    #[default]
    All,
    /// Optional tests' regressions are reported as warnings only
    Required,
}

/// Reporting and gating policy for optional (`kind`-tagged) tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPolicy {
    pub unchanged_failing: FailingScope,
    pub regression_gate: GateScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// One reported line of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub id: String,
    pub class: Classification,
    pub severity: Severity,
    pub optional: bool,
    /// Current failure, for failing classifications
    pub detail: Option<Failure>,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class, self.id)?;
        if let Some(detail) = &self.detail {
            write!(f, " {}", detail)?;
        }
        Ok(())
    }
}

/// Number of ids per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub regression: usize,
    pub improvement: usize,
    pub new_passing: usize,
    pub new_failing: usize,
    pub unchanged_passing: usize,
    pub unchanged_failing: usize,
}

impl ClassCounts {
    fn slot(&mut self, class: Classification) -> &mut usize {
        match class {
            Classification::Regression => &mut self.regression,
            Classification::Improvement => &mut self.improvement,
            Classification::NewPassing => &mut self.new_passing,
            Classification::NewFailing => &mut self.new_failing,
            Classification::UnchangedPassing => &mut self.unchanged_passing,
            Classification::UnchangedFailing => &mut self.unchanged_failing,
        }
    }

    pub fn get(&self, class: Classification) -> usize {
        match class {
            Classification::Regression => self.regression,
            Classification::Improvement => self.improvement,
            Classification::NewPassing => self.new_passing,
            Classification::NewFailing => self.new_failing,
            Classification::UnchangedPassing => self.unchanged_passing,
            Classification::UnchangedFailing => self.unchanged_failing,
        }
    }
}

/// Result of comparing a run against a baseline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Regressions that fail the run
    pub regressions: usize,
    /// Regressions of optional tests excluded from gating
    pub advisory_regressions: usize,
    pub counts: ClassCounts,
    /// Reported entries, in the current result set's order
    pub entries: Vec<ReportEntry>,
}

impl Comparison {
    pub fn is_success(&self) -> bool {
        self.regressions == 0
    }

    /// Emit every entry through `tracing` at its severity
    pub fn log(&self) {
        for entry in &self.entries {
            match entry.severity {
                Severity::Error => error!("{}", entry),
                Severity::Warn => warn!("{}", entry),
                Severity::Info => info!("{}", entry),
            }
        }
    }
}

/// Classify every id in `current` against `baseline`
pub fn classify(
    current: &ResultSet,
    baseline: &ResultSet,
    index: &TestIndex,
    policy: &ReportPolicy,
) -> Comparison {
    let mut comparison = Comparison::default();

    for (id, outcome) in current.iter() {
        let class = classify_one(outcome, baseline.get(id));
        let optional = index.is_optional(id);
        *comparison.counts.slot(class) += 1;

        let severity = match class {
            Classification::UnchangedPassing => continue,
            Classification::Regression => {
                if optional && policy.regression_gate == GateScope::Required {
                    comparison.advisory_regressions += 1;
                    Severity::Warn
                } else {
                    comparison.regressions += 1;
                    Severity::Error
                }
            }
            Classification::UnchangedFailing => {
                if optional && policy.unchanged_failing == FailingScope::Required {
                    continue;
                }
                Severity::Info
            }
            Classification::Improvement
            | Classification::NewPassing
            | Classification::NewFailing => Severity::Info,
        };

        comparison.entries.push(ReportEntry {
            id: id.to_string(),
            class,
            severity,
            optional,
            detail: outcome.failure().cloned(),
        });
    }

    comparison
}
