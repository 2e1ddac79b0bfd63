//! One HTTP poll of a service.
//!
//! A [`Fetcher`] performs a GET with the configured headers, extracts the
//! configured selectors from the body and reports exactly one [`Outcome`].
//! It never touches dashboard state; the caller ships the report back to
//! the orchestrator as an event.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::{Selector, ServiceSpec};

use super::extract::extract;
use super::fields::Fields;
use super::headers::prepare_headers;

/// Fixed per-request timeout, covering connect, headers and body.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be constructed (bad URL, bad header).
    Build(String),
    /// Connect/DNS/TLS/protocol failure after the request was sent.
    Transport(String),
    /// No response within the timeout.
    Timeout(Duration),
    /// Status line received but the body could not be read.
    Body(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Build(msg) => write!(f, "invalid request: {}", msg),
            FetchError::Transport(msg) => write!(f, "request failed: {}", msg),
            FetchError::Timeout(after) => write!(f, "request timed out after {:?}", after),
            FetchError::Body(msg) => write!(f, "failed to read response body: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Result of one fetch.
///
/// HTTP error statuses are *not* failures: a readable body is a `Success`
/// whatever the status code.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success {
        fields: Fields,
        http_status: u16,
        latency: Duration,
    },
    Failure {
        error: FetchError,
        /// Known only when the failure happened while reading the body.
        http_status: Option<u16>,
        /// Zero when the request was never sent.
        latency: Duration,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// Outcome plus the non-fatal warnings raised while preparing the request.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub outcome: Outcome,
    pub warnings: Vec<String>,
}

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Shared HTTP client for all fetches. Cheap to clone.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    timeout: Duration,
    env: EnvLookup,
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Fetcher {
    /// Creates a fetcher with the standard [`FETCH_TIMEOUT`] that reads
    /// header variables from the process environment.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("charming/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Build(error_chain(&e)))?;

        Ok(Self {
            client,
            timeout,
            env: Arc::new(|name| std::env::var(name).ok()),
        })
    }

    /// Replaces the environment used for `{VAR}` header substitution.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    /// Polls `spec` once.
    pub async fn run(&self, spec: &ServiceSpec) -> FetchReport {
        let prepared = prepare_headers(&spec.headers, |name| (self.env)(name));
        for warning in &prepared.warnings {
            warn!(service = %spec.title, "{}", warning);
        }

        let outcome = self.fetch(spec, &prepared.headers).await;
        match &outcome {
            Outcome::Success {
                http_status,
                latency,
                ..
            } => debug!(service = %spec.title, status = http_status, ?latency, "fetch ok"),
            Outcome::Failure { error, .. } => {
                debug!(service = %spec.title, error = %error, "fetch failed")
            }
        }

        FetchReport {
            outcome,
            warnings: prepared.warnings,
        }
    }

    async fn fetch(&self, spec: &ServiceSpec, headers: &[(String, String)]) -> Outcome {
        let mut builder = self.client.get(&spec.url);
        for (key, value) in headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let request = match builder.build() {
            Ok(request) => request,
            Err(e) => {
                return Outcome::Failure {
                    error: FetchError::Build(error_chain(&e)),
                    http_status: None,
                    latency: Duration::ZERO,
                };
            }
        };

        let start = Instant::now();
        let response = self.client.execute(request).await;
        let latency = start.elapsed();

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                return Outcome::Failure {
                    error: self.classify(&e, FetchError::Transport),
                    http_status: None,
                    latency,
                };
            }
        };

        let http_status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Outcome::Failure {
                    error: self.classify(&e, FetchError::Body),
                    http_status: Some(http_status),
                    latency,
                };
            }
        };

        Outcome::Success {
            fields: extract_fields(&body, &spec.selectors),
            http_status,
            latency,
        }
    }

    fn classify(&self, err: &reqwest::Error, otherwise: fn(String) -> FetchError) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            otherwise(error_chain(err))
        }
    }
}

/// Evaluates every selector against `body`. Every selector name is present
/// in the result; non-matching paths map to `""`.
pub fn extract_fields(body: &str, selectors: &[Selector]) -> Fields {
    selectors
        .iter()
        .map(|s| (s.name.clone(), extract(body, &s.path)))
        .collect()
}

/// Formats an error with its source chain, skipping causes already
/// contained in the outer message.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Selector;
    use std::collections::HashMap;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn spec(url: String, headers: &[&str], selectors: &[(&str, &str)]) -> ServiceSpec {
        ServiceSpec {
            url,
            title: "test".to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            refresh_interval: None,
            selectors: selectors
                .iter()
                .map(|(n, p)| Selector::new(*n, *p))
                .collect(),
        }
    }

    fn fetcher_with_env(vars: &[(&str, &str)]) -> Fetcher {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Fetcher::new()
            .unwrap()
            .with_env(move |name| map.get(name).cloned())
    }

    #[tokio::test]
    async fn test_success_extracts_all_selectors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "ok", "build": {"v": "1.2"}})),
            )
            .mount(&server)
            .await;

        let spec = spec(
            format!("{}/health", server.uri()),
            &[],
            &[("status", "status"), ("version", "build.v"), ("gone", "nope")],
        );
        let report = fetcher_with_env(&[]).run(&spec).await;

        match report.outcome {
            Outcome::Success {
                fields,
                http_status,
                ..
            } => {
                assert_eq!(http_status, 200);
                let pairs: Vec<(&str, &str)> = fields.iter().collect();
                assert_eq!(
                    pairs,
                    vec![("status", "ok"), ("version", "1.2"), ("gone", "")]
                );
            }
            other => panic!("expected success, got {:?}", other),
        }
        assert!(report.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_with_body_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "boom"})),
            )
            .mount(&server)
            .await;

        let spec = spec(server.uri(), &[], &[("error", "error")]);
        let report = fetcher_with_env(&[]).run(&spec).await;

        match report.outcome {
            Outcome::Success {
                fields,
                http_status,
                ..
            } => {
                assert_eq!(http_status, 500);
                assert_eq!(fields.get("error"), Some("boom"));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_env_header_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("Authorization", "abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let spec = spec(server.uri(), &["Authorization: {TOKEN}"], &[]);
        let report = fetcher_with_env(&[("TOKEN", "abc123")]).run(&spec).await;

        assert!(report.outcome.is_success());
        server.verify().await;
    }

    #[tokio::test]
    async fn test_unset_env_header_is_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let spec = spec(server.uri(), &["Authorization: {TOKEN}", "X-Static: 1"], &[]);
        let report = fetcher_with_env(&[]).run(&spec).await;
        assert!(report.outcome.is_success());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
        assert_eq!(
            requests[0].headers.get("x-static").map(|v| v.as_bytes()),
            Some(&b"1"[..])
        );
    }

    #[tokio::test]
    async fn test_malformed_header_line_warns_and_fetch_proceeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"a": 1}"#))
            .mount(&server)
            .await;

        let spec = spec(server.uri(), &["BadHeaderNoColon"], &[("a", "a")]);
        let report = fetcher_with_env(&[]).run(&spec).await;

        assert!(report.outcome.is_success());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("BadHeaderNoColon"));
    }

    #[tokio::test]
    async fn test_non_json_body_yields_empty_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let spec = spec(server.uri(), &[], &[("status", "status")]);
        match fetcher_with_env(&[]).run(&spec).await.outcome {
            Outcome::Success { fields, .. } => assert_eq!(fields.get("status"), Some("")),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_is_build_failure() {
        let spec = spec("not a url".to_string(), &[], &[("a", "a")]);
        match fetcher_with_env(&[]).run(&spec).await.outcome {
            Outcome::Failure {
                error,
                http_status,
                latency,
            } => {
                assert!(matches!(error, FetchError::Build(_)));
                assert_eq!(http_status, None);
                assert_eq!(latency, Duration::ZERO);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let spec = spec(format!("http://{}/", addr), &[], &[]);
        match fetcher_with_env(&[]).run(&spec).await.outcome {
            Outcome::Failure {
                error, http_status, ..
            } => {
                assert!(matches!(error, FetchError::Transport(_)), "{:?}", error);
                assert_eq!(http_status, None);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let fetcher = Fetcher::with_timeout(Duration::from_millis(200)).unwrap();
        let spec = spec(server.uri(), &[], &[]);
        match fetcher.run(&spec).await.outcome {
            Outcome::Failure {
                error,
                http_status,
                latency,
            } => {
                assert_eq!(error, FetchError::Timeout(Duration::from_millis(200)));
                assert_eq!(http_status, None);
                assert!(latency >= Duration::from_millis(200));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            FetchError::Timeout(FETCH_TIMEOUT).to_string(),
            "request timed out after 10s"
        );
        assert_eq!(
            FetchError::Body("eof".to_string()).to_string(),
            "failed to read response body: eof"
        );
    }
}
