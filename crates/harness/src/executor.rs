//! Scenario executor - runs one test case against the cache under test
//!
//! Each test case gets a fresh run token. The executor first scripts the
//! origin behind the cache (`PUT {base}/config/{token}`), then issues every
//! step in order to `{base}/test/{token}/{filename}` and grades the graded
//! ones. The origin numbers the requests it receives and reports that
//! number in `Server-Request-Count`; a response whose number is lower than
//! the step's own request number was served from the cache.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{HarnessError, HarnessResult};
use crate::results::{Failure, Outcome};
use crate::scenario::{ExpectedType, HeaderExpectation, RequestStep, TestCase};
use crate::transport::{find_header, HttpRequest, HttpResponse, Transport};

/// Response header the origin stamps with its request number
pub const REQUEST_COUNT_HEADER: &str = "Server-Request-Count";

/// Request header carrying the run token
pub const TEST_ID_HEADER: &str = "Test-ID";

/// Request header carrying the 1-based step number
pub const REQ_NUM_HEADER: &str = "Req-Num";

/// What the origin serves for one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServedResponse {
    pub filename: String,
    pub request_method: String,
    pub response_status: (u16, String),
    pub response_headers: Vec<(String, String)>,
    pub response_body: String,
}

/// A request as the origin saw it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginRequest {
    pub request_num: usize,
    pub request_method: String,
    #[serde(default)]
    pub request_headers: Vec<(String, String)>,
}

/// One exchange captured for a dumped test case
#[derive(Debug, Clone)]
pub struct StepTrace {
    pub req_num: usize,
    pub setup: bool,
    pub request: HttpRequest,
    /// `None` when the exchange failed
    pub response: Option<HttpResponse>,
}

/// Everything one execution produced
#[derive(Debug, Clone)]
pub struct Execution {
    pub outcome: Outcome,
    /// Number of graded steps that were checked
    pub graded: usize,
    /// Captured exchanges; empty unless the test case is dumped
    pub traces: Vec<StepTrace>,
}

/// Runs test cases through a transport against one base URL
pub struct Executor<T> {
    transport: T,
    base_url: Url,
    default_pause: Duration,
}

impl<T: Transport> Executor<T> {
    pub fn new(transport: T, base_url: &str) -> HarnessResult<Self> {
        Ok(Self {
            transport,
            base_url: parse_base_url(base_url)?,
            default_pause: Duration::from_secs(3),
        })
    }

    /// Pause used for `pause_after: true`
    pub fn with_default_pause(mut self, pause: Duration) -> Self {
        self.default_pause = pause;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute a test case. Never fails: transport problems and unmet
    /// expectations both end up in the returned outcome.
    pub async fn execute(&self, test: &TestCase) -> Execution {
        let token = Uuid::new_v4().to_string();
        let mut run = Run {
            test,
            token,
            graded: 0,
            traces: Vec::new(),
        };

        let outcome = match self.run_steps(&mut run).await {
            Ok(()) => Outcome::Pass,
            Err(failure) => Outcome::Fail(failure),
        };

        Execution {
            outcome,
            graded: run.graded,
            traces: run.traces,
        }
    }

    async fn run_steps(&self, run: &mut Run<'_>) -> Result<(), Failure> {
        let test = run.test;
        let script: Vec<ServedResponse> = test
            .requests
            .iter()
            .map(|step| served_response(step, &run.token))
            .collect();

        self.configure_origin(&run.token, &script).await?;

        for (idx, step) in test.requests.iter().enumerate() {
            let req_num = idx + 1;
            let request = self.step_request(&run.token, req_num, step)?;

            if test.dump {
                log_request(req_num, &request);
            }

            let result = self.transport.send(request.clone()).await;
            if test.dump {
                run.traces.push(StepTrace {
                    req_num,
                    setup: step.setup,
                    request,
                    response: result.as_ref().ok().cloned(),
                });
            }

            let response = result.map_err(|e| {
                Failure::harness(format!(
                    "Request {} ({} {}) failed: {}",
                    req_num, step.request_method, step.filename, e
                ))
            })?;

            if test.dump {
                log_response(req_num, &response);
            }

            if !step.setup {
                run.graded += 1;
                self.grade(&run.token, idx, step, &response, &script).await?;
            }

            if req_num < test.requests.len() {
                if let Some(pause) = step.pause(self.default_pause) {
                    debug!("Pausing {:?} after request {}", pause, req_num);
                    tokio::time::sleep(pause).await;
                }
            }
        }

        Ok(())
    }

    /// Check every expectation of a graded step, stopping at the first failure
    async fn grade(
        &self,
        token: &str,
        idx: usize,
        step: &RequestStep,
        response: &HttpResponse,
        script: &[ServedResponse],
    ) -> Result<(), Failure> {
        let req_num = idx + 1;

        if let Some(expected) = step.expected_status {
            if response.status != expected {
                return Err(Failure::assertion(format!(
                    "Response {} status is {}, not {}",
                    req_num, response.status, expected
                )));
            }
        }

        if let Some(expected) = step.expected_type {
            let count = request_count(req_num, response)?;
            match expected {
                ExpectedType::Cached if count >= req_num => {
                    return Err(Failure::assertion(format!(
                        "Response {} does not come from cache",
                        req_num
                    )));
                }
                ExpectedType::NotCached if count != req_num => {
                    return Err(Failure::assertion(format!(
                        "Response {} comes from cache",
                        req_num
                    )));
                }
                _ => {}
            }
        }

        for header in step.response_headers.iter().filter(|h| h.check) {
            match response.header(&header.name) {
                None => {
                    return Err(Failure::assertion(format!(
                        "Response {} {} header not present",
                        req_num, header.name
                    )));
                }
                Some(value) if value != header.value => {
                    return Err(Failure::assertion(format!(
                        "Response {} header {} is \"{}\", not \"{}\"",
                        req_num, header.name, value, header.value
                    )));
                }
                Some(_) => {}
            }
        }

        for expectation in &step.expected_response_headers {
            check_header("Response", req_num, &response.headers, expectation)?;
        }

        for name in &step.expected_response_headers_missing {
            if response.header(name).is_some() {
                return Err(Failure::assertion(format!(
                    "Response {} {} header present",
                    req_num, name
                )));
            }
        }

        if let Some(source) = step.check_body.and_then(|c| c.source_step(req_num)) {
            let served = source
                .checked_sub(1)
                .and_then(|i| script.get(i))
                .ok_or_else(|| {
                    Failure::setup(format!(
                        "Response {} checks the body of request {}, which does not exist",
                        req_num, source
                    ))
                })?;
            if response.body != served.response_body.as_bytes() {
                return Err(Failure::assertion(format!(
                    "Response {} body is \"{}\", not \"{}\"",
                    req_num,
                    response.body_text(),
                    served.response_body
                )));
            }
        }

        if step.checks_origin_requests() {
            let count = request_count(req_num, response)?;
            let requests = self.origin_state(token).await?;
            let seen = requests
                .iter()
                .find(|r| r.request_num == count)
                .ok_or_else(|| {
                    Failure::assertion(format!(
                        "Origin did not see request {} behind response {}",
                        count, req_num
                    ))
                })?;

            for expectation in &step.expected_request_headers {
                check_header("Request", req_num, &seen.request_headers, expectation)?;
            }
            for name in &step.expected_request_headers_missing {
                if find_header(&seen.request_headers, name).is_some() {
                    return Err(Failure::assertion(format!(
                        "Request {} {} header present",
                        req_num, name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Script the origin with the responses to serve for this run
    async fn configure_origin(
        &self,
        token: &str,
        script: &[ServedResponse],
    ) -> Result<(), Failure> {
        let url = self.join(&format!("config/{}", token))?;
        let body = serde_json::to_string(script)
            .map_err(|e| Failure::setup(format!("Cannot encode test configuration: {}", e)))?;
        let request = HttpRequest::new("PUT", url)
            .header("Content-Type", "application/json")
            .body(body);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| Failure::harness(format!("Cannot configure origin: {}", e)))?;

        if !response.is_success() {
            return Err(Failure::setup(format!(
                "Origin rejected test configuration with status {}",
                response.status
            )));
        }
        Ok(())
    }

    /// Requests the origin has received for this run
    async fn origin_state(&self, token: &str) -> Result<Vec<OriginRequest>, Failure> {
        let url = self.join(&format!("state/{}", token))?;
        let response = self
            .transport
            .send(HttpRequest::new("GET", url))
            .await
            .map_err(|e| Failure::harness(format!("Cannot read origin state: {}", e)))?;

        if !response.is_success() {
            return Err(Failure::harness(format!(
                "Origin state request returned status {}",
                response.status
            )));
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| Failure::harness(format!("Malformed origin state: {}", e)))
    }

    fn step_request(
        &self,
        token: &str,
        req_num: usize,
        step: &RequestStep,
    ) -> Result<HttpRequest, Failure> {
        let url = self.join(&format!("test/{}/{}", token, step.filename))?;
        let mut request = HttpRequest::new(step.request_method.clone(), url)
            .header(TEST_ID_HEADER, token)
            .header(REQ_NUM_HEADER, req_num.to_string());

        for (name, value) in &step.request_headers {
            request = request.header(name.clone(), value.clone());
        }
        if let Some(body) = &step.request_body {
            request = request.body(body.clone());
        }
        Ok(request)
    }

    fn join(&self, path: &str) -> Result<Url, Failure> {
        self.base_url
            .join(path)
            .map_err(|e| Failure::setup(format!("Cannot build URL for {}: {}", path, e)))
    }
}

struct Run<'a> {
    test: &'a TestCase,
    token: String,
    graded: usize,
    traces: Vec<StepTrace>,
}

/// Parse a base URL so that relative paths resolve beneath it
pub fn parse_base_url(base_url: &str) -> HarnessResult<Url> {
    let mut url = Url::parse(base_url).map_err(|e| HarnessError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(HarnessError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "not a hierarchical URL".to_string(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn served_response(step: &RequestStep, token: &str) -> ServedResponse {
    ServedResponse {
        filename: step.filename.clone(),
        request_method: step.request_method.clone(),
        response_status: step
            .response_status
            .clone()
            .unwrap_or_else(|| (200, "OK".to_string())),
        response_headers: step
            .response_headers
            .iter()
            .map(|h| (h.name.clone(), h.value.clone()))
            .collect(),
        response_body: step.response_body.clone().unwrap_or_else(|| token.to_string()),
    }
}

fn request_count(req_num: usize, response: &HttpResponse) -> Result<usize, Failure> {
    response
        .header(REQUEST_COUNT_HEADER)
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| {
            Failure::harness(format!(
                "Response {} has no usable {} header; cannot tell whether it came from cache",
                req_num, REQUEST_COUNT_HEADER
            ))
        })
}

fn check_header(
    what: &str,
    req_num: usize,
    headers: &[(String, String)],
    expectation: &HeaderExpectation,
) -> Result<(), Failure> {
    let name = expectation.name();
    match (find_header(headers, name), expectation.value()) {
        (None, _) => Err(Failure::assertion(format!(
            "{} {} {} header not present",
            what, req_num, name
        ))),
        (Some(actual), Some(expected)) if actual != expected => Err(Failure::assertion(format!(
            "{} {} header {} is \"{}\", not \"{}\"",
            what, req_num, name, actual, expected
        ))),
        _ => Ok(()),
    }
}

fn log_request(req_num: usize, request: &HttpRequest) {
    info!("=== Client request {}", req_num);
    info!("    {} {}", request.method, request.url);
    for (name, value) in &request.headers {
        info!("    {}: {}", name, value);
    }
}

fn log_response(req_num: usize, response: &HttpResponse) {
    info!("=== Client response {}", req_num);
    info!("    HTTP {}", response.status);
    for (name, value) in &response.headers {
        info!("    {}: {}", name, value);
    }
    info!("    {}", response.body_text());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{CheckBody, PauseAfter, ServedHeader};
    use crate::transport::TransportError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use test_case::test_case;

    /// Replies with queued responses and records what was sent
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn reply(self, response: Result<HttpResponse, TransportError>) -> Self {
            self.replies.lock().unwrap().push_back(response);
            self
        }

        fn ok(self, count: Option<usize>, body: &str) -> Self {
            let mut headers = Vec::new();
            if let Some(count) = count {
                headers.push((REQUEST_COUNT_HEADER.to_string(), count.to_string()));
            }
            self.reply(Ok(HttpResponse {
                status: 200,
                headers,
                body: body.as_bytes().to_vec(),
            }))
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Other("no scripted reply".into())))
        }
    }

    fn case(requests: Vec<RequestStep>) -> TestCase {
        TestCase {
            name: "test".into(),
            id: "test".into(),
            kind: None,
            requests,
            dump: false,
        }
    }

    fn executor(transport: ScriptedTransport) -> Executor<ScriptedTransport> {
        Executor::new(transport, "http://cache.test:8080").unwrap()
    }

    #[tokio::test]
    async fn test_setup_only_case_passes_without_grading() {
        let exec = executor(ScriptedTransport::default().ok(None, "").ok(None, "anything"));
        let test = case(vec![RequestStep {
            filename: "root/".into(),
            setup: true,
            expected_type: Some(ExpectedType::Cached),
            ..Default::default()
        }]);

        let execution = exec.execute(&test).await;
        assert_eq!(execution.outcome, Outcome::Pass);
        assert_eq!(execution.graded, 0);
        assert!(execution.traces.is_empty());
    }

    #[tokio::test]
    async fn test_requests_are_scoped_by_token() {
        let exec = executor(ScriptedTransport::default().ok(None, "").ok(Some(1), ""));
        let test = case(vec![RequestStep {
            filename: "root/page".into(),
            request_headers: vec![("Accept".into(), "text/plain".into())],
            ..Default::default()
        }]);

        exec.execute(&test).await;
        let sent = exec.transport.sent();
        assert_eq!(sent.len(), 2);

        assert_eq!(sent[0].method, "PUT");
        let token = sent[0].url.path().trim_start_matches("/config/").to_string();
        let script: Vec<ServedResponse> =
            serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(script[0].response_body, token);
        assert_eq!(script[0].response_status, (200, "OK".to_string()));

        assert_eq!(sent[1].url.path(), format!("/test/{}/root/page", token));
        assert_eq!(find_header(&sent[1].headers, TEST_ID_HEADER), Some(token.as_str()));
        assert_eq!(find_header(&sent[1].headers, REQ_NUM_HEADER), Some("1"));
        assert_eq!(find_header(&sent[1].headers, "accept"), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_harness_error() {
        let exec = executor(
            ScriptedTransport::default()
                .ok(None, "")
                .reply(Err(TransportError::Connect("refused".into())))
                .ok(Some(1), ""),
        );
        let test = case(vec![
            RequestStep {
                filename: "a".into(),
                setup: true,
                ..Default::default()
            },
            RequestStep {
                filename: "a".into(),
                ..Default::default()
            },
        ]);

        let execution = exec.execute(&test).await;
        let failure = execution.outcome.failure().unwrap();
        assert!(failure.is_harness_error());
        assert!(failure.message.contains("Request 1"));
        // Nothing is issued after the failed exchange
        assert_eq!(exec.transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_origin_config_rejected_is_setup_failure() {
        let exec = executor(ScriptedTransport::default().reply(Ok(HttpResponse {
            status: 500,
            ..Default::default()
        })));
        let test = case(vec![RequestStep::default()]);

        let execution = exec.execute(&test).await;
        assert_eq!(execution.outcome.failure().unwrap().kind, crate::FailureKind::Setup);
        assert_eq!(exec.transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_undeterminable_provenance_is_harness_error() {
        let exec = executor(ScriptedTransport::default().ok(None, "").ok(None, ""));
        let test = case(vec![RequestStep {
            expected_type: Some(ExpectedType::Cached),
            ..Default::default()
        }]);

        let execution = exec.execute(&test).await;
        assert!(execution.outcome.failure().unwrap().is_harness_error());
    }

    #[tokio::test]
    async fn test_expected_type_uses_request_count() {
        let exec = executor(
            ScriptedTransport::default()
                .ok(None, "")
                .ok(Some(1), "")
                .ok(Some(1), "")
                .ok(Some(2), ""),
        );
        let test = case(vec![
            RequestStep {
                expected_type: Some(ExpectedType::NotCached),
                ..Default::default()
            },
            RequestStep {
                expected_type: Some(ExpectedType::Cached),
                ..Default::default()
            },
            RequestStep {
                expected_type: Some(ExpectedType::Cached),
                ..Default::default()
            },
        ]);

        let execution = exec.execute(&test).await;
        assert_eq!(execution.outcome, Outcome::Pass);
        assert_eq!(execution.graded, 3);
    }

    #[tokio::test]
    async fn test_first_failure_stops_the_case() {
        let exec = executor(
            ScriptedTransport::default()
                .ok(None, "")
                .ok(Some(1), "")
                .ok(Some(2), "")
                .ok(Some(2), ""),
        );
        let test = case(vec![
            RequestStep::default(),
            RequestStep {
                expected_type: Some(ExpectedType::Cached),
                expected_response_headers: vec![HeaderExpectation::Present("Age".into())],
                ..Default::default()
            },
            RequestStep::default(),
        ]);

        let execution = exec.execute(&test).await;
        let failure = execution.outcome.failure().unwrap();
        assert_eq!(failure.message, "Response 2 does not come from cache");
        assert_eq!(exec.transport.sent().len(), 3);
    }

    #[tokio::test]
    async fn test_served_headers_are_checked_unless_flagged() {
        let exec = executor(ScriptedTransport::default().ok(None, "").ok(Some(1), ""));
        let test = case(vec![RequestStep {
            response_headers: vec![
                ServedHeader {
                    name: "Date".into(),
                    value: "x".into(),
                    check: false,
                },
                ServedHeader {
                    name: "ETag".into(),
                    value: "\"1\"".into(),
                    check: true,
                },
            ],
            ..Default::default()
        }]);

        let failure = exec.execute(&test).await.outcome.failure().cloned().unwrap();
        assert_eq!(failure.message, "Response 1 ETag header not present");
    }

    #[tokio::test]
    async fn test_header_value_mismatch() {
        let exec = executor(ScriptedTransport::default().ok(None, "").ok(Some(3), ""));
        let test = case(vec![RequestStep {
            expected_response_headers: vec![HeaderExpectation::Equals(
                "Server-Request-Count".into(),
                "1".into(),
            )],
            ..Default::default()
        }]);

        let failure = exec.execute(&test).await.outcome.failure().cloned().unwrap();
        assert_eq!(failure.message, "Response 1 header Server-Request-Count is \"3\", not \"1\"");
    }

    #[tokio::test]
    async fn test_check_body_against_prior_step() {
        let exec = executor(
            ScriptedTransport::default()
                .ok(None, "")
                .ok(Some(1), "first")
                .ok(Some(2), "second"),
        );
        let test = case(vec![
            RequestStep {
                response_body: Some("first".into()),
                ..Default::default()
            },
            RequestStep {
                response_body: Some("second".into()),
                check_body: Some(CheckBody::Step(1)),
                ..Default::default()
            },
        ]);

        let failure = exec.execute(&test).await.outcome.failure().cloned().unwrap();
        assert_eq!(failure.message, "Response 2 body is \"second\", not \"first\"");
    }

    #[test_case(5 ; "past the last step")]
    #[test_case(0 ; "step zero")]
    #[tokio::test]
    async fn test_check_body_missing_step_is_setup_failure(step: usize) {
        let exec = executor(ScriptedTransport::default().ok(None, "").ok(Some(1), ""));
        let test = case(vec![RequestStep {
            check_body: Some(CheckBody::Step(step)),
            ..Default::default()
        }]);

        let failure = exec.execute(&test).await.outcome.failure().cloned().unwrap();
        assert_eq!(failure.kind, crate::FailureKind::Setup);
        assert_eq!(
            failure.message,
            format!("Response 1 checks the body of request {}, which does not exist", step)
        );
    }

    #[tokio::test]
    async fn test_request_headers_checked_against_origin_state() {
        let state = serde_json::json!([
            {"request_num": 1, "request_method": "GET", "request_headers": [["Test-ID", "t"]]},
            {"request_num": 2, "request_method": "GET", "request_headers": [["Via", "cache"]]}
        ]);
        let exec = executor(
            ScriptedTransport::default()
                .ok(None, "")
                .ok(Some(2), "")
                .ok(None, &state.to_string()),
        );
        let test = case(vec![RequestStep {
            expected_request_headers: vec![HeaderExpectation::Present("via".into())],
            expected_request_headers_missing: vec!["test-id".into()],
            ..Default::default()
        }]);

        let execution = exec.execute(&test).await;
        assert_eq!(execution.outcome, Outcome::Pass);
        let sent = exec.transport.sent();
        assert!(sent[2].url.path().starts_with("/state/"));
    }

    #[tokio::test]
    async fn test_dump_captures_traces_without_changing_outcome() {
        let exec = executor(
            ScriptedTransport::default()
                .ok(None, "")
                .ok(Some(1), "")
                .ok(Some(2), ""),
        );
        let mut test = case(vec![
            RequestStep {
                setup: true,
                ..Default::default()
            },
            RequestStep {
                expected_type: Some(ExpectedType::Cached),
                ..Default::default()
            },
        ]);
        test.dump = true;

        let execution = exec.execute(&test).await;
        assert_eq!(
            execution.outcome.failure().unwrap().message,
            "Response 2 does not come from cache"
        );
        assert_eq!(execution.traces.len(), 2);
        assert!(execution.traces[0].setup);
        assert_eq!(execution.traces[1].req_num, 2);
        assert!(execution.traces[1].response.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_blocks_next_step_only() {
        let exec = executor(
            ScriptedTransport::default()
                .ok(None, "")
                .ok(Some(1), "")
                .ok(Some(1), ""),
        )
        .with_default_pause(Duration::from_secs(2));
        let test = case(vec![
            RequestStep {
                pause_after: Some(PauseAfter::Flag(true)),
                ..Default::default()
            },
            RequestStep {
                pause_after: Some(PauseAfter::Seconds(30.0)),
                ..Default::default()
            },
        ]);

        let start = tokio::time::Instant::now();
        let execution = exec.execute(&test).await;
        let elapsed = start.elapsed();

        assert_eq!(execution.outcome, Outcome::Pass);
        // The trailing pause is skipped because no step follows it
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("http://localhost:8080/prefix").unwrap();
        assert_eq!(url.join("test/x").unwrap().path(), "/prefix/test/x");
        assert!(parse_base_url("not a url").is_err());
    }
}
