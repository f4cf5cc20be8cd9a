//! In-process stand-in for a cache in front of the scripted origin

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use cachetest_harness::executor::{OriginRequest, ServedResponse, REQUEST_COUNT_HEADER};
use cachetest_harness::transport::find_header;
use cachetest_harness::{HttpRequest, HttpResponse, Transport, TransportError};

#[derive(Default)]
struct Origin {
    script: Vec<ServedResponse>,
    requests: Vec<OriginRequest>,
}

struct Stored {
    response: HttpResponse,
    stored_at: Instant,
    lifetime: Duration,
}

#[derive(Default)]
struct State {
    origins: HashMap<String, Origin>,
    store: HashMap<String, Stored>,
    sent: usize,
}

/// Shared cache honouring `max-age`/`s-maxage`, backed by an origin that
/// serves the configured script and numbers its requests
pub struct SimulatedCache {
    state: Mutex<State>,
    caching: bool,
}

impl SimulatedCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            caching: true,
        }
    }

    /// A cache that forwards everything
    pub fn pass_through() -> Self {
        Self {
            state: Mutex::new(State::default()),
            caching: false,
        }
    }

    /// Number of requests received, configuration and state included
    pub fn requests_sent(&self) -> usize {
        self.state.lock().unwrap().sent
    }
}

fn freshness_lifetime(headers: &[(String, String)]) -> Option<Duration> {
    let cache_control = find_header(headers, "Cache-Control")?;
    let mut lifetime = None;
    for directive in cache_control.split(',').map(str::trim) {
        if directive.eq_ignore_ascii_case("no-store") || directive.eq_ignore_ascii_case("private") {
            return None;
        }
        if let Some((name, value)) = directive.split_once('=') {
            let max_age = name.eq_ignore_ascii_case("max-age") && lifetime.is_none();
            if name.eq_ignore_ascii_case("s-maxage") || max_age {
                lifetime = value.trim().parse::<u64>().ok().map(Duration::from_secs);
            }
        }
    }
    lifetime.filter(|d| !d.is_zero())
}

impl State {
    fn fetch(&mut self, token: &str, request: &HttpRequest) -> HttpResponse {
        let origin = self.origins.entry(token.to_string()).or_default();
        let request_num = origin.requests.len() + 1;
        origin.requests.push(OriginRequest {
            request_num,
            request_method: request.method.clone(),
            request_headers: request.headers.clone(),
        });

        let Some(served) = origin
            .script
            .get(request_num - 1)
            .or_else(|| origin.script.last())
            .cloned()
        else {
            return HttpResponse {
                status: 404,
                ..Default::default()
            };
        };

        let mut headers = served.response_headers.clone();
        headers.push((REQUEST_COUNT_HEADER.to_string(), request_num.to_string()));
        HttpResponse {
            status: served.response_status.0,
            headers,
            body: served.response_body.into_bytes(),
        }
    }
}

#[async_trait]
impl Transport for SimulatedCache {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.sent += 1;

        let path = request.url.path().trim_start_matches('/').to_string();
        let mut parts = path.splitn(3, '/');
        let kind = parts.next().unwrap_or("").to_string();
        let token = parts.next().unwrap_or("").to_string();

        match kind.as_str() {
            "config" => {
                let script = serde_json::from_str(request.body.as_deref().unwrap_or("[]"))
                    .map_err(|e| TransportError::Other(e.to_string()))?;
                state.origins.entry(token).or_default().script = script;
                Ok(HttpResponse {
                    status: 201,
                    ..Default::default()
                })
            }
            "state" => {
                let requests = state
                    .origins
                    .get(&token)
                    .map(|o| o.requests.clone())
                    .unwrap_or_default();
                Ok(HttpResponse {
                    status: 200,
                    headers: vec![("Content-Type".into(), "application/json".into())],
                    body: serde_json::to_vec(&requests)
                        .map_err(|e| TransportError::Other(e.to_string()))?,
                })
            }
            "test" => {
                let cacheable = self.caching && request.method == "GET";
                if cacheable {
                    if let Some(stored) = state.store.get(&path) {
                        let age = stored.stored_at.elapsed();
                        if age < stored.lifetime {
                            let mut response = stored.response.clone();
                            response.headers.push(("Age".into(), age.as_secs().to_string()));
                            return Ok(response);
                        }
                    }
                }

                let response = state.fetch(&token, &request);
                if cacheable {
                    if let Some(lifetime) = freshness_lifetime(&response.headers) {
                        state.store.insert(
                            path,
                            Stored {
                                response: response.clone(),
                                stored_at: Instant::now(),
                                lifetime,
                            },
                        );
                    }
                }
                Ok(response)
            }
            _ => Ok(HttpResponse {
                status: 404,
                ..Default::default()
            }),
        }
    }
}
