//! Delivery error types.

use thiserror::Error;

use super::HttpError;

/// Failure of a single delivery attempt.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// No response was obtained.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}{}", .body.as_deref().map(|b| format!(": {b}")).unwrap_or_default())]
    Status {
        /// Response status.
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8.
        body: Option<String>,
    },

    /// The body template failed to render.
    #[error("Template error: {0}")]
    Template(String),
}

/// Final outcome of a failed delivery.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// An attempt failed in a way retrying cannot fix.
    #[error("Delivery rejected: {0}")]
    Rejected(#[source] AttemptError),

    /// Every allowed attempt failed.
    #[error("Delivery failed after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// Attempts made.
        attempts: u32,
        /// Error from the final attempt.
        #[source]
        last_error: AttemptError,
    },
}

/// Whether an error is worth another attempt.
pub trait IsRetryable {
    /// Returns true for transient failures.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            Self::InvalidRequest(_) => false,
        }
    }
}

impl IsRetryable for AttemptError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            Self::Status { status, .. } => {
                status.is_server_error()
                    || *status == http::StatusCode::TOO_MANY_REQUESTS
                    || *status == http::StatusCode::REQUEST_TIMEOUT
            }
            Self::Template(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> AttemptError {
        AttemptError::Status {
            status: http::StatusCode::from_u16(code).unwrap(),
            body: None,
        }
    }

    #[test]
    fn transport_failures_are_retryable() {
        assert!(HttpError::Timeout.is_retryable());
        assert!(HttpError::Connection("refused".into()).is_retryable());
        assert!(!HttpError::InvalidRequest("bad header".into()).is_retryable());
    }

    #[test]
    fn server_errors_and_throttling_are_retryable() {
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(status(408).is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        assert!(!status(400).is_retryable());
        assert!(!status(401).is_retryable());
        assert!(!status(404).is_retryable());
    }

    #[test]
    fn template_errors_are_not_retryable() {
        assert!(!AttemptError::Template("unclosed".into()).is_retryable());
    }

    #[test]
    fn status_display_includes_body() {
        let err = AttemptError::Status {
            status: http::StatusCode::BAD_GATEWAY,
            body: Some("upstream down".into()),
        };
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway: upstream down");
        assert_eq!(status(404).to_string(), "HTTP 404 Not Found");
    }

    #[test]
    fn max_retries_display() {
        let err = DeliveryError::MaxRetriesExceeded {
            attempts: 3,
            last_error: AttemptError::Http(HttpError::Timeout),
        };
        assert_eq!(
            err.to_string(),
            "Delivery failed after 3 attempts: Request timed out"
        );
    }
}
