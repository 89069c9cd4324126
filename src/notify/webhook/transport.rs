//! Minimal HTTP client seam and its reqwest implementation.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Per-request timeout applied by [`ReqwestClient`] unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport-level failure.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection, DNS or TLS failure.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not answer in time.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built (bad URL, bad header).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// An outgoing request, built from `http` crate types.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: http::Method,
    /// Target URL.
    pub url: url::Url,
    /// Headers to send.
    pub headers: http::HeaderMap,
    /// Request body.
    pub body: Vec<u8>,
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: http::StatusCode,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Returns the body as UTF-8 text, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Sends HTTP requests.
///
/// Abstracted so webhook delivery can be tested with a mock client.
pub trait HttpClient: Send + Sync {
    /// Sends `req` and returns the buffered response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no response could be obtained. Non-2xx
    /// statuses are returned as ordinary responses.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// [`HttpClient`] backed by `reqwest::Client`.
///
/// Every request is bounded by a timeout so a hung endpoint cannot stall
/// delivery forever.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    timeout: Duration,
}

impl ReqwestClient {
    /// Creates a client with reqwest's default configuration and
    /// [`DEFAULT_REQUEST_TIMEOUT`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_client(reqwest::Client::new())
    }

    /// Wraps an existing reqwest client (proxies, TLS).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self {
            inner: client,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = self
            .inner
            .request(req.method, req.url.as_str())
            .headers(req.headers)
            .body(req.body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Connection(Box::new(e)))?
            .to_vec();

        Ok(HttpResponse::new(status, body))
    }
}

fn classify_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidRequest(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
