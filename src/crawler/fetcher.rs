//! HTTP fetcher implementation
//!
//! Workers only see the [`Fetcher`] trait, so tests and embedders can swap
//! the network for anything that maps a URL to a body and a status. The
//! reqwest-backed [`HttpFetcher`] is the production transport:
//! - default headers from the configuration on every request
//! - redirects followed (up to 10 hops)
//! - request and connect timeouts, so one fetch never stalls a worker forever
//! - every transport failure collapsed into "no body, status 400"

use crate::state::TRANSPORT_FAILURE_STATUS;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{redirect::Policy, Client};
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 10;

/// Result of fetching one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Response text, `None` when missing or empty
    pub body: Option<String>,
    /// HTTP status, or 400 when the transport failed
    pub status: u16,
}

impl FetchOutcome {
    pub fn new(body: Option<String>, status: u16) -> Self {
        Self {
            body: body.filter(|b| !b.is_empty()),
            status,
        }
    }

    /// Outcome for a request that never produced a response
    pub fn transport_failure() -> Self {
        Self {
            body: None,
            status: TRANSPORT_FAILURE_STATUS,
        }
    }
}

/// Transport used by the workers
///
/// Implementations must never fail: errors are reported through the
/// outcome's status.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Builds the shared HTTP client, sending `headers` with every request
///
/// # Example
///
/// ```no_run
/// use scopecrawl::crawler::build_http_client;
/// use std::collections::BTreeMap;
///
/// let mut headers = BTreeMap::new();
/// headers.insert("User-Agent".to_string(), "scopecrawl".to_string());
/// let client = build_http_client(&headers).unwrap();
/// ```
pub fn build_http_client(headers: &BTreeMap<String, String>) -> Result<Client, crate::ScopeError> {
    let mut default_headers = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            crate::ConfigError::InvalidHeader(format!("'{}': {}", name, e))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            crate::ConfigError::InvalidHeader(format!("value for '{}': {}", name, e))
        })?;
        default_headers.insert(name, value);
    }

    let client = Client::builder()
        .default_headers(default_headers)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a URL and normalizes the result
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Any response | its status, its text (None if empty) |
/// | Body cannot be decoded | `(None, 400)` |
/// | DNS, connect, TLS, timeout, redirect failure | `(None, 400)` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!(url, error = %e, "request failed");
            return FetchOutcome::transport_failure();
        }
    };

    let status = response.status().as_u16();
    match response.text().await {
        Ok(body) => FetchOutcome::new(Some(body), status),
        Err(e) => {
            debug!(url, status, error = %e, "failed to read body");
            FetchOutcome::transport_failure()
        }
    }
}

/// reqwest-backed [`Fetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(headers: &BTreeMap<String, String>) -> Result<Self, crate::ScopeError> {
        Ok(Self {
            client: build_http_client(headers)?,
        })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send {
        fetch_url(&self.client, url)
    }
}
