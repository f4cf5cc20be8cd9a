//! Test outcomes and the persisted result set
//!
//! On disk a result file is a JSON object mapping test ids to either the
//! literal `true` (pass) or a failure detail. Failures written by this crate
//! take the form `["Kind", "message"]`; anything else that is not `true` is
//! still read back as a failure.

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::error::{HarnessError, HarnessResult};

/// Why a test case did not pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// A declared expectation did not hold
    Assertion,
    /// The backend could not be scripted for the test
    Setup,
    /// The exchange itself failed, or the response could not be graded
    Harness,
    /// A failure name this crate does not produce, read from a result file
    Other(String),
}

impl FailureKind {
    pub fn as_str(&self) -> &str {
        match self {
            FailureKind::Assertion => "Assertion",
            FailureKind::Setup => "Setup",
            FailureKind::Harness => "Harness",
            FailureKind::Other(name) => name,
        }
    }

    fn parse(name: &str) -> Self {
        match name {
            "Assertion" => FailureKind::Assertion,
            "Setup" => FailureKind::Setup,
            "Harness" => FailureKind::Harness,
            other => FailureKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn assertion(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Assertion,
            message: message.into(),
        }
    }

    pub fn setup(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Setup,
            message: message.into(),
        }
    }

    pub fn harness(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Harness,
            message: message.into(),
        }
    }

    pub fn is_harness_error(&self) -> bool {
        self.kind == FailureKind::Harness
    }

    fn from_value(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Array(items) => {
                if let [Value::String(name), Value::String(message)] = items.as_slice() {
                    return Self {
                        kind: FailureKind::parse(name),
                        message: message.clone(),
                    };
                }
                Self {
                    kind: FailureKind::Other("Unknown".into()),
                    message: Value::Array(items).to_string(),
                }
            }
            Value::String(message) => Self {
                kind: FailureKind::Other("Unknown".into()),
                message,
            },
            other => Self {
                kind: FailureKind::Other("Unknown".into()),
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

/// Result of one test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(Failure),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Pass => None,
            Outcome::Fail(failure) => Some(failure),
        }
    }
}

impl From<Failure> for Outcome {
    fn from(failure: Failure) -> Self {
        Outcome::Fail(failure)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass => write!(f, "pass"),
            Outcome::Fail(failure) => write!(f, "{}", failure),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Pass => serializer.serialize_bool(true),
            Outcome::Fail(failure) => {
                (failure.kind.as_str(), failure.message.as_str()).serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Bool(true) => Outcome::Pass,
            other => Outcome::Fail(Failure::from_value(other)),
        })
    }
}

/// Ordered map from test id to outcome; each id is recorded once
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    outcomes: IndexMap<String, Outcome>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a test case. Recording the same id twice is an error.
    pub fn record(&mut self, id: impl Into<String>, outcome: Outcome) -> HarnessResult<()> {
        let id = id.into();
        if self.outcomes.contains_key(&id) {
            return Err(HarnessError::DuplicateResult(id));
        }
        self.outcomes.insert(id, outcome);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Outcome> {
        self.outcomes.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.outcomes.iter().map(|(id, outcome)| (id.as_str(), outcome))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.passed()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read a persisted result file
    pub fn load(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|source| HarnessError::MalformedResults {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a baseline, treating a missing file as an empty baseline
    pub fn load_or_empty(path: &Path) -> HarnessResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No baseline at {}; every test will be reported as new", path.display());
            Ok(Self::new())
        }
    }

    /// Write the result set as pretty-printed JSON
    pub fn write(&self, path: &Path) -> HarnessResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        info!("Results written to: {}", path.display());
        Ok(())
    }
}

impl<'de> Deserialize<'de> for ResultSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResultSetVisitor;

        impl<'de> Visitor<'de> for ResultSetVisitor {
            type Value = ResultSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from test id to outcome")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ResultSet, A::Error> {
                let mut results = ResultSet::new();
                while let Some((id, outcome)) = map.next_entry::<String, Outcome>()? {
                    results.record(id, outcome).map_err(de::Error::custom)?;
                }
                Ok(results)
            }
        }

        deserializer.deserialize_map(ResultSetVisitor)
    }
}
