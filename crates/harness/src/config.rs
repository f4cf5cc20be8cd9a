//! Harness configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::compare::ReportPolicy;
use crate::error::{HarnessError, HarnessResult};

/// Harness configuration, read from `cachetest.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Base URL of the cache under test
    pub base_url: String,

    /// Fixture files or directories, composed in order
    pub fixtures: Vec<FixtureSource>,

    /// Baseline result file to compare against after a run
    pub baseline: PathBuf,

    /// Pause used for `pause_after: true`, in seconds
    pub default_pause_secs: f64,

    /// Per-request timeout, in seconds
    pub request_timeout_secs: u64,

    /// How optional tests are reported and gated
    pub report: ReportPolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            fixtures: vec![FixtureSource::new("fixtures")],
            baseline: PathBuf::from("results.json"),
            default_pause_secs: 3.0,
            request_timeout_secs: 10,
            report: ReportPolicy::default(),
        }
    }
}

/// A fixture file or directory. Disabled sources are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSource {
    pub path: PathBuf,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            enabled: true,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> HarnessResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if Duration::try_from_secs_f64(self.default_pause_secs).is_err() {
            return Err(HarnessError::InvalidConfig(format!(
                "default_pause_secs must be a non-negative number of seconds, got {}",
                self.default_pause_secs
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(HarnessError::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Only meaningful on a validated configuration; out-of-range values yield zero
    pub fn default_pause(&self) -> Duration {
        Duration::try_from_secs_f64(self.default_pause_secs).unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
