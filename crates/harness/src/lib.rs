//! cachetest harness
//!
//! This crate drives an HTTP cache through scripted request sequences and
//! grades what comes back:
//! - Parses declarative YAML/JSON suites of cache scenarios
//! - Scripts the origin backend for each test case and issues its requests
//! - Records one outcome per test case in an ordered result set
//! - Classifies a result set against a stored baseline to find regressions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      cachetest harness                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  select(suites, test_id?) -> [Suite]                        │
//! │  SuiteRunner                                                │
//! │    └── Executor::execute(test) -> Execution { outcome }     │
//! │          ├── PUT  /config/{token}   (script the origin)     │
//! │          ├── METHOD /test/{token}/{filename}  per step      │
//! │          └── GET  /state/{token}    (request expectations)  │
//! │  ResultSet { id -> Pass | Fail(reason) }                    │
//! │  classify(current, baseline) -> Comparison { regressions }  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod executor;
pub mod results;
pub mod runner;
pub mod scenario;
pub mod select;
pub mod transport;

pub use compare::{classify, Classification, Comparison, ReportPolicy};
pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use executor::{Execution, Executor};
pub use results::{Failure, FailureKind, Outcome, ResultSet};
pub use runner::{RunSummary, SuiteRunner};
pub use scenario::{RequestStep, Suite, TestCase, TestIndex, TestKind};
pub use select::select;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};
