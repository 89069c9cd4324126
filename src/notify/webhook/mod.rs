//! One-shot delivery over HTTP.
//!
//! - [`HttpClient`] abstracts the transport ([`ReqwestClient`] in production)
//! - [`HttpWebhook`] renders a body and retries per [`RetryPolicy`]

mod error;
mod retry;
mod sender;
mod transport;

pub use error::{AttemptError, DeliveryError, IsRetryable};
pub use retry::RetryPolicy;
pub use sender::{HttpWebhook, OneShotSender};
pub use transport::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestClient};
