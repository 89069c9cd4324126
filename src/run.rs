//! Application execution logic.
//!
//! This module contains the main async loop that polls the watched
//! adapter, applies each report to the local sinks and hands one-shot
//! notifications to the webhook.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};

use speed_notifier::config::{ValidatedConfig, WebhookConfig};
use speed_notifier::monitor::{DisconnectNotify, LogEntry, PollingMonitor, Report};
use speed_notifier::network::platform::PlatformFetcher;
use speed_notifier::network::{HardwareId, MatchingQuery};
use speed_notifier::notify::{
    HttpWebhook, Indicator, LogBook, Notifier, OneShotSender, ReqwestClient, TracingIndicator,
};
use speed_notifier::time::{Clock, SystemClock};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Unexpected stream termination.
    #[error("Monitor stream terminated unexpectedly")]
    StreamTerminated,
}

/// Runtime options extracted from validated config.
struct RuntimeOptions {
    hardware_id: HardwareId,
    poll_interval: Duration,
    disconnect_notify: DisconnectNotify,
    dry_run: bool,
}

impl From<&ValidatedConfig> for RuntimeOptions {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            hardware_id: config.hardware_id,
            poll_interval: config.poll_interval,
            disconnect_notify: config.disconnect_notify,
            dry_run: config.dry_run,
        }
    }
}

/// Maximum number of one-shots waiting for delivery.
///
/// When the endpoint falls this far behind, newer one-shots are dropped
/// with a warning instead of growing memory without bound.
const DELIVERY_QUEUE_CAPACITY: usize = 32;

/// How long shutdown waits for queued deliveries before abandoning them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Where one-shot notifications go besides the local indicator.
enum Delivery {
    /// No webhook configured.
    Disabled,
    /// Webhook configured but `--dry-run` is set.
    DryRun,
    /// Deliver through a single worker, in dispatch order.
    Webhook {
        queue: mpsc::Sender<Report>,
        worker: JoinHandle<()>,
    },
}

impl Delivery {
    /// Spawns the delivery worker when a sender is configured and live.
    ///
    /// Must be called from within a Tokio runtime.
    fn new<W: OneShotSender + 'static>(sender: Option<W>, dry_run: bool) -> Self {
        match sender {
            None => Self::Disabled,
            Some(_) if dry_run => Self::DryRun,
            Some(sender) => {
                let (queue, pending) = mpsc::channel(DELIVERY_QUEUE_CAPACITY);
                let worker = tokio::spawn(deliver_in_order(sender, pending));
                Self::Webhook { queue, worker }
            }
        }
    }

    /// Queues the report's one-shot without waiting for delivery.
    fn dispatch(&self, report: &Report) {
        let Some(one_shot) = &report.one_shot else {
            return;
        };

        match self {
            Self::Disabled => {}
            Self::DryRun => {
                tracing::info!("Dry-run: skipping webhook for \"{}\"", one_shot.body);
            }
            Self::Webhook { queue, .. } => match queue.try_send(report.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("Webhook queue full, dropping \"{}\"", one_shot.body);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::error!("Webhook worker stopped, dropping \"{}\"", one_shot.body);
                }
            },
        }
    }

    /// Stops accepting one-shots and waits up to `grace` for the queue
    /// to drain. Deliveries still pending after that are abandoned.
    async fn shutdown(self, grace: Duration) {
        let Self::Webhook { queue, mut worker } = self else {
            return;
        };
        drop(queue);

        if tokio::time::timeout(grace, &mut worker).await.is_err() {
            tracing::warn!("Pending webhook deliveries abandoned at shutdown");
            worker.abort();
        }
    }
}

/// Delivers queued one-shots one at a time until the queue is closed.
async fn deliver_in_order<W: OneShotSender>(sender: W, mut pending: mpsc::Receiver<Report>) {
    while let Some(report) = pending.recv().await {
        match sender.send(&report).await {
            Ok(()) => tracing::debug!("Webhook sent for \"{}\"", report.status_text),
            Err(e) => tracing::error!("Webhook failed: {e}"),
        }
    }
}

/// Executes the main application loop.
///
/// This function:
/// 1. Writes the startup lines to the status log
/// 2. Creates the adapter query and polling monitor
/// 3. Starts the webhook delivery worker, if configured
/// 4. Applies every report until a shutdown signal (Ctrl+C / SIGTERM)
/// 5. Gives queued webhook deliveries a short grace period to finish
///
/// # Errors
///
/// Returns an error if the monitor stream terminates unexpectedly.
///
/// # Coverage Note
///
/// Excluded from coverage: requires platform adapter tables and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let options = RuntimeOptions::from(&config);
    let webhook = config.webhook.as_ref().map(create_webhook);

    if options.dry_run {
        tracing::info!("Dry-run mode enabled - webhook requests will be logged but not sent");
    }

    let log = Arc::new(LogBook::new());
    log_startup(&log, options.hardware_id, &SystemClock);

    let notifier = Notifier::new(TracingIndicator, log);
    let delivery = Delivery::new(webhook, options.dry_run);

    tracing::info!(
        "Polling adapter {} every {}s",
        options.hardware_id,
        options.poll_interval.as_secs()
    );

    let query = MatchingQuery::new(PlatformFetcher::default(), options.hardware_id);
    let stream = PollingMonitor::new(query, options.poll_interval)
        .with_disconnect_notify(options.disconnect_notify)
        .into_stream();

    let result = run_loop(stream, &notifier, &delivery, shutdown_signal()).await;
    delivery.shutdown(SHUTDOWN_GRACE).await;
    result
}

/// Writes the lines that precede the first tick.
fn log_startup(log: &LogBook, hardware_id: HardwareId, clock: &impl Clock) {
    log.append(LogEntry::new(clock.now(), "Startup."));
    log.append(LogEntry::new(
        clock.now(),
        format!("MAC configured: {hardware_id}"),
    ));
}

/// Creates the HTTP webhook sender from configuration.
fn create_webhook(config: &WebhookConfig) -> HttpWebhook<ReqwestClient> {
    let mut webhook = HttpWebhook::new(ReqwestClient::new(), config.url.clone())
        .with_method(config.method.clone())
        .with_headers(config.headers.clone())
        .with_retry_policy(config.retry_policy.clone());

    if let Some(ref template) = config.body_template {
        webhook = webhook.with_body_template(template);
    }

    webhook
}

/// Applies reports until `shutdown` completes or the stream ends.
async fn run_loop<S, I>(
    stream: S,
    notifier: &Notifier<I>,
    delivery: &Delivery,
    shutdown: impl Future<Output = ()>,
) -> Result<(), RunError>
where
    S: Stream<Item = Report>,
    I: Indicator,
{
    tokio::pin!(stream);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }

            report = stream.next() => {
                let Some(report) = report else {
                    return Err(RunError::StreamTerminated);
                };
                notifier.apply(&report);
                delivery.dispatch(&report);
            }
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
