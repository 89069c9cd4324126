//! Notify layer: everything that renders reports to the outside world.
//!
//! - Persistent status indicator ([`Indicator`], [`TracingIndicator`])
//! - Append-only status log ([`LogBook`])
//! - Local sink fan-out ([`Notifier`])
//! - Remote one-shot delivery ([`OneShotSender`], [`HttpWebhook`])

mod indicator;
mod log;
mod notifier;
mod webhook;

pub use indicator::{Indicator, TracingIndicator};
pub use log::{LogBook, STATUS_LOG_TARGET};
pub use notifier::Notifier;
pub use webhook::{
    AttemptError, DeliveryError, HttpClient, HttpError, HttpRequest, HttpResponse, HttpWebhook,
    IsRetryable, OneShotSender, ReqwestClient, RetryPolicy,
};
