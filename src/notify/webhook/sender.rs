//! One-shot sender trait and HTTP webhook implementation.

use std::future::Future;

use chrono::{DateTime, Local};
use handlebars::Handlebars;
use serde::Serialize;

use super::{AttemptError, DeliveryError, HttpClient, HttpRequest, IsRetryable, RetryPolicy};
use crate::monitor::{LOG_TIMESTAMP_FORMAT, Report, format_speed};
use crate::time::{Sleeper, TokioSleeper};

/// Delivers one-shot notifications somewhere outside the process.
///
/// Implementations handle retries internally and return
/// [`DeliveryError::MaxRetriesExceeded`] when every attempt fails.
pub trait OneShotSender: Send + Sync {
    /// Delivers the notification carried by `report`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if delivery fails after all retries.
    fn send(&self, report: &Report) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// Posts one-shot notifications to an HTTP endpoint with retries.
///
/// # Body
///
/// With a body template (Handlebars), the template is rendered over the
/// payload fields below. Without one, the fields are sent as a JSON
/// object with `Content-Type: application/json`.
///
/// - `status`: persistent status text (`Speed: 1.0 Gbps`)
/// - `message`: one-shot body, or the status text if there is none
/// - `icon`: `not-connected`, `degraded` or `good`
/// - `state`: `no-adapter`, `disconnected` or `connected`
/// - `speed_bps`: negotiated speed, `0` unless connected
/// - `speed`: human-readable speed, empty unless connected
/// - `timestamp`: local time of the transition (`2026-10-19T08:30:00`)
///
/// # Example
///
/// ```
/// use speed_notifier::notify::{HttpWebhook, ReqwestClient};
/// use url::Url;
///
/// let webhook = HttpWebhook::new(
///     ReqwestClient::new(),
///     Url::parse("https://hooks.example.com/link").unwrap(),
/// );
/// assert_eq!(webhook.method(), &http::Method::POST);
/// ```
#[derive(Debug)]
pub struct HttpWebhook<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    url: url::Url,
    method: http::Method,
    headers: http::HeaderMap,
    body_template: Option<String>,
    retry_policy: RetryPolicy,
}

impl<H> HttpWebhook<H, TokioSleeper> {
    /// Creates a webhook using POST, no extra headers, a JSON body and
    /// the default retry policy.
    #[must_use]
    pub fn new(client: H, url: url::Url) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            url,
            method: http::Method::POST,
            headers: http::HeaderMap::new(),
            body_template: None,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> HttpWebhook<H, S> {
    /// Replaces the sleeper used between retries.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> HttpWebhook<H, S2> {
        HttpWebhook {
            client: self.client,
            sleeper,
            url: self.url,
            method: self.method,
            headers: self.headers,
            body_template: self.body_template,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }

    /// Sets extra request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a Handlebars body template.
    #[must_use]
    pub fn with_body_template(mut self, template: impl Into<String>) -> Self {
        self.body_template = Some(template.into());
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the target URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

/// Fields exposed to the body template and the default JSON body.
#[derive(Debug, Serialize)]
struct Payload<'a> {
    status: &'a str,
    message: &'a str,
    icon: &'static str,
    state: &'static str,
    speed_bps: u64,
    speed: String,
    timestamp: String,
}

impl<'a> From<&'a Report> for Payload<'a> {
    fn from(report: &'a Report) -> Self {
        let speed = if report.state.is_connected() {
            format_speed(report.state.speed_bps())
        } else {
            String::new()
        };
        let timestamp = DateTime::<Local>::from(report.log.timestamp)
            .format(LOG_TIMESTAMP_FORMAT)
            .to_string();

        Self {
            status: &report.status_text,
            message: report
                .one_shot
                .as_ref()
                .map_or(report.status_text.as_str(), |o| o.body.as_str()),
            icon: report.icon.as_str(),
            state: report.state.phase().name(),
            speed_bps: report.state.speed_bps(),
            speed,
            timestamp,
        }
    }
}

impl<H: HttpClient, S: Sleeper> HttpWebhook<H, S> {
    fn render_body(&self, report: &Report) -> Result<Vec<u8>, AttemptError> {
        let payload = Payload::from(report);

        match &self.body_template {
            Some(template) => Handlebars::new()
                .render_template(template, &payload)
                .map(String::into_bytes)
                .map_err(|e| AttemptError::Template(e.to_string())),
            None => serde_json::to_vec(&payload).map_err(|e| AttemptError::Template(e.to_string())),
        }
    }

    fn build_request(&self, report: &Report) -> Result<HttpRequest, AttemptError> {
        let body = self.render_body(report)?;
        let mut headers = self.headers.clone();

        if self.body_template.is_none() && !headers.contains_key(http::header::CONTENT_TYPE) {
            headers.insert(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );
        }

        Ok(HttpRequest {
            method: self.method.clone(),
            url: self.url.clone(),
            headers,
            body,
        })
    }

    async fn attempt(&self, request: &HttpRequest) -> Result<(), AttemptError> {
        let response = self.client.request(request.clone()).await?;

        if response.status.is_success() {
            return Ok(());
        }

        Err(AttemptError::Status {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }

    async fn send_with_retry(&self, report: &Report) -> Result<(), DeliveryError> {
        let request = self.build_request(report).map_err(DeliveryError::Rejected)?;
        let mut attempt = 1;

        loop {
            let error = match self.attempt(&request).await {
                Ok(()) => {
                    tracing::debug!(attempt, url = %self.url, "Webhook delivered");
                    return Ok(());
                }
                Err(e) if !e.is_retryable() => return Err(DeliveryError::Rejected(e)),
                Err(e) => e,
            };

            if !self.retry_policy.allows_retry_after(attempt) {
                return Err(DeliveryError::MaxRetriesExceeded {
                    attempts: attempt,
                    last_error: error,
                });
            }

            let delay = self.retry_policy.delay_after(attempt);
            tracing::warn!(attempt, error = %error, ?delay, "Webhook attempt failed, retrying");
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }
}

impl<H: HttpClient, S: Sleeper> OneShotSender for HttpWebhook<H, S> {
    async fn send(&self, report: &Report) -> Result<(), DeliveryError> {
        self.send_with_retry(report).await
    }
}

#[cfg(test)]
#[path = "sender_tests.rs"]
mod tests;
