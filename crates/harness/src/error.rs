//! Error types for the harness
//!
//! Only configuration problems are errors. Transport failures and failed
//! expectations during a scenario become an [`Outcome`](crate::Outcome).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Cannot find test {0}")]
    UnknownTest(String),

    #[error("Duplicate test id: {0}")]
    DuplicateTestId(String),

    #[error("Result for {0} was already recorded")]
    DuplicateResult(String),

    #[error("Invalid fixture {path}: {reason}")]
    InvalidFixture { path: PathBuf, reason: String },

    #[error("Unsupported fixture file: {0}")]
    UnsupportedFixture(PathBuf),

    #[error("Malformed results file {path}: {source}")]
    MalformedResults {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
