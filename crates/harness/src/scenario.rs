//! Declarative cache scenario model and fixture loading

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::FixtureSource;
use crate::error::{HarnessError, HarnessResult};

/// A named group of test cases, usually one fixture file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    /// Human-readable name
    pub name: String,

    /// Unique suite identifier
    pub id: String,

    #[serde(default)]
    pub description: String,

    /// RFC sections the suite exercises
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spec_anchors: Vec<String>,

    /// Test cases in execution order
    pub tests: Vec<TestCase>,
}

/// A single graded scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,

    /// Unique across every suite in a run
    pub id: String,

    /// Absent for required conformance tests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TestKind>,

    /// Request steps, executed strictly in order
    pub requests: Vec<RequestStep>,

    /// Capture and print every exchange of this test case
    #[serde(default)]
    pub dump: bool,
}

impl TestCase {
    /// Whether the test case is an optional/advisory check
    pub fn is_optional(&self) -> bool {
        self.kind.is_some()
    }
}

/// Tag for tests that are not required for conformance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// Checks behaviour the RFC leaves open
    Check,
    /// Checks behaviour the RFC recommends but does not require
    Optimal,
}

/// One HTTP exchange: what the client sends, what the origin serves, and
/// what the client expects to get back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestStep {
    /// Path relative to the test case's scope
    #[serde(default)]
    pub filename: String,

    #[serde(default = "default_method")]
    pub request_method: String,

    #[serde(default)]
    pub request_headers: Vec<(String, String)>,

    #[serde(default)]
    pub request_body: Option<String>,

    /// Status line the origin serves for this step
    #[serde(default)]
    pub response_status: Option<(u16, String)>,

    /// Headers the origin serves for this step
    #[serde(default)]
    pub response_headers: Vec<ServedHeader>,

    /// Body the origin serves; defaults to the test's run token
    #[serde(default)]
    pub response_body: Option<String>,

    /// Establishes state only; never graded
    #[serde(default)]
    pub setup: bool,

    #[serde(default)]
    pub pause_after: Option<PauseAfter>,

    #[serde(default)]
    pub expected_type: Option<ExpectedType>,

    #[serde(default)]
    pub expected_status: Option<u16>,

    #[serde(default)]
    pub expected_response_headers: Vec<HeaderExpectation>,

    #[serde(default)]
    pub expected_response_headers_missing: Vec<String>,

    #[serde(default)]
    pub expected_request_headers: Vec<HeaderExpectation>,

    #[serde(default)]
    pub expected_request_headers_missing: Vec<String>,

    #[serde(default)]
    pub check_body: Option<CheckBody>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl Default for RequestStep {
    fn default() -> Self {
        Self {
            filename: String::new(),
            request_method: default_method(),
            request_headers: Vec::new(),
            request_body: None,
            response_status: None,
            response_headers: Vec::new(),
            response_body: None,
            setup: false,
            pause_after: None,
            expected_type: None,
            expected_status: None,
            expected_response_headers: Vec::new(),
            expected_response_headers_missing: Vec::new(),
            expected_request_headers: Vec::new(),
            expected_request_headers_missing: Vec::new(),
            check_body: None,
        }
    }
}

impl RequestStep {
    /// Whether grading this step needs the origin's view of the requests
    pub fn checks_origin_requests(&self) -> bool {
        !self.expected_request_headers.is_empty()
            || !self.expected_request_headers_missing.is_empty()
    }

    /// Pause to apply after this step, if any
    pub fn pause(&self, default: Duration) -> Option<Duration> {
        self.pause_after.as_ref().and_then(|p| p.duration(default))
    }
}

/// A served response header. Written as `[name, value]` or
/// `[name, value, check]`; `check: false` skips verifying it on the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ServedHeaderRepr", into = "ServedHeaderRepr")]
pub struct ServedHeader {
    pub name: String,
    pub value: String,
    pub check: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ServedHeaderRepr {
    Flagged(String, String, bool),
    Plain(String, String),
}

impl From<ServedHeaderRepr> for ServedHeader {
    fn from(repr: ServedHeaderRepr) -> Self {
        match repr {
            ServedHeaderRepr::Flagged(name, value, check) => Self { name, value, check },
            ServedHeaderRepr::Plain(name, value) => Self {
                name,
                value,
                check: true,
            },
        }
    }
}

impl From<ServedHeader> for ServedHeaderRepr {
    fn from(header: ServedHeader) -> Self {
        if header.check {
            ServedHeaderRepr::Plain(header.name, header.value)
        } else {
            ServedHeaderRepr::Flagged(header.name, header.value, false)
        }
    }
}

/// `true` pauses for the configured default, a number for that many seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PauseAfter {
    Flag(bool),
    Seconds(f64),
}

impl PauseAfter {
    pub fn duration(&self, default: Duration) -> Option<Duration> {
        match *self {
            PauseAfter::Flag(false) => None,
            PauseAfter::Flag(true) => Some(default),
            PauseAfter::Seconds(secs) if secs > 0.0 => Duration::try_from_secs_f64(secs).ok(),
            PauseAfter::Seconds(_) => None,
        }
    }

    fn check(&self) -> Result<(), String> {
        match *self {
            PauseAfter::Seconds(secs) => Duration::try_from_secs_f64(secs)
                .map(|_| ())
                .map_err(|_| format!("pause_after {} is not a valid duration", secs)),
            PauseAfter::Flag(_) => Ok(()),
        }
    }
}

/// Where the response is expected to come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedType {
    /// Served from the cache without reaching the origin
    Cached,
    /// Fetched from the origin for this request
    NotCached,
}

/// `"Name"` checks presence, `["Name", "value"]` checks the value too
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderExpectation {
    Present(String),
    Equals(String, String),
}

impl HeaderExpectation {
    pub fn name(&self) -> &str {
        match self {
            HeaderExpectation::Present(name) | HeaderExpectation::Equals(name, _) => name,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            HeaderExpectation::Present(_) => None,
            HeaderExpectation::Equals(_, value) => Some(value),
        }
    }
}

/// `true` compares against this step's served body, a number against the
/// body served for that (1-based) step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckBody {
    Flag(bool),
    Step(usize),
}

impl CheckBody {
    /// 1-based number of the step whose body is expected
    pub fn source_step(&self, current: usize) -> Option<usize> {
        match *self {
            CheckBody::Flag(false) => None,
            CheckBody::Flag(true) => Some(current),
            CheckBody::Step(n) => Some(n),
        }
    }
}

/// A fixture file holds either one suite or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum SuiteFile {
    Many(Vec<Suite>),
    One(Suite),
}

impl From<SuiteFile> for Vec<Suite> {
    fn from(file: SuiteFile) -> Self {
        match file {
            SuiteFile::Many(suites) => suites,
            SuiteFile::One(suite) => vec![suite],
        }
    }
}

impl Suite {
    /// Parse suites from a YAML string
    pub fn from_yaml(yaml: &str) -> HarnessResult<Vec<Self>> {
        let file: SuiteFile = serde_yaml::from_str(yaml)?;
        Ok(file.into())
    }

    /// Parse suites from a JSON string
    pub fn from_json(json: &str) -> HarnessResult<Vec<Self>> {
        let file: SuiteFile = serde_json::from_str(json)?;
        Ok(file.into())
    }

    /// Parse suites from a fixture file, picking the format by extension
    pub fn from_file(path: &Path) -> HarnessResult<Vec<Self>> {
        let content = std::fs::read_to_string(path)?;
        let parsed = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            _ => return Err(HarnessError::UnsupportedFixture(path.to_path_buf())),
        };

        let suites = parsed.map_err(|e| HarnessError::InvalidFixture {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        for suite in &suites {
            suite.validate().map_err(|reason| HarnessError::InvalidFixture {
                path: path.to_path_buf(),
                reason,
            })?;
        }

        debug!("Loaded {} suite(s) from {}", suites.len(), path.display());
        Ok(suites)
    }

    /// Load suites from a fixture file or a directory of fixture files
    pub fn load_all(path: &Path) -> HarnessResult<Vec<Self>> {
        if path.is_file() {
            return Self::from_file(path);
        }

        let mut suites = Vec::new();

        for entry in walkdir::WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml" || ext == "json")
                    .unwrap_or(false)
            })
        {
            suites.extend(Self::from_file(entry.path())?);
        }

        Ok(suites)
    }

    /// Compose the suite list from the configured sources, in order
    pub fn compose(sources: &[FixtureSource]) -> HarnessResult<Vec<Self>> {
        let mut suites = Vec::new();

        for source in sources {
            if !source.enabled {
                debug!("Skipping disabled fixture source {}", source.path.display());
                continue;
            }
            if !source.path.exists() {
                return Err(HarnessError::InvalidConfig(format!(
                    "fixture source not found: {}",
                    source.path.display()
                )));
            }
            suites.extend(Self::load_all(&source.path)?);
        }

        info!(
            "Loaded {} suite(s) with {} test case(s)",
            suites.len(),
            suites.iter().map(|s| s.tests.len()).sum::<usize>()
        );
        Ok(suites)
    }

    fn validate(&self) -> Result<(), String> {
        for test in &self.tests {
            if test.requests.is_empty() {
                return Err(format!("test {} has no requests", test.id));
            }
            for (idx, step) in test.requests.iter().enumerate() {
                if let Some(pause) = step.pause_after {
                    pause
                        .check()
                        .map_err(|e| format!("test {} request {}: {}", test.id, idx + 1, e))?;
                }
            }
        }
        Ok(())
    }
}

/// Lookup from test id to its kind, used when reporting
#[derive(Debug, Clone, Default)]
pub struct TestIndex {
    kinds: HashMap<String, Option<TestKind>>,
}

impl TestIndex {
    pub fn from_suites(suites: &[Suite]) -> Self {
        let kinds = suites
            .iter()
            .flat_map(|s| s.tests.iter())
            .map(|t| (t.id.clone(), t.kind))
            .collect();
        Self { kinds }
    }

    /// Unknown ids are treated as required tests
    pub fn kind(&self, id: &str) -> Option<TestKind> {
        self.kinds.get(id).copied().flatten()
    }

    pub fn is_optional(&self, id: &str) -> bool {
        self.kind(id).is_some()
    }
}
