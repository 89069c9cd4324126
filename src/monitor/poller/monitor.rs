//! Polling monitor configuration.
//!
//! This module provides [`PollingMonitor`], the builder/configuration struct
//! for creating a polling link monitor.

use super::super::DisconnectNotify;
use super::stream::LinkStream;
use crate::network::AdapterQuery;
use crate::time::{Clock, SystemClock};
use std::time::Duration;

/// Polling-based link monitor.
///
/// Samples the watched adapter at a fixed interval and emits a stream of
/// [`super::super::Report`]s, one per state transition.
///
/// # Type Parameters
///
/// * `Q` - The [`AdapterQuery`] sampling the watched adapter
/// * `C` - The [`Clock`] implementation for log timestamps (defaults to [`SystemClock`])
///
/// # Example
///
/// ```ignore
/// use speed_notifier::monitor::PollingMonitor;
/// use std::time::Duration;
///
/// let monitor = PollingMonitor::new(query, Duration::from_secs(1));
///
/// let mut stream = monitor.into_stream();
/// while let Some(report) = stream.next().await {
///     println!("{}", report.status_text);
/// }
/// ```
pub struct PollingMonitor<Q, C = SystemClock> {
    query: Q,
    clock: C,
    interval: Duration,
    disconnect_notify: DisconnectNotify,
}

impl<Q> PollingMonitor<Q, SystemClock>
where
    Q: AdapterQuery,
{
    /// Creates a new polling monitor with system clock.
    ///
    /// # Arguments
    ///
    /// * `query` - Samples the watched adapter each tick
    /// * `interval` - The interval between ticks
    #[must_use]
    pub const fn new(query: Q, interval: Duration) -> Self {
        Self::with_clock(query, SystemClock, interval)
    }
}

impl<Q, C> PollingMonitor<Q, C>
where
    Q: AdapterQuery,
    C: Clock,
{
    /// Creates a new polling monitor with a custom clock.
    #[must_use]
    pub const fn with_clock(query: Q, clock: C, interval: Duration) -> Self {
        Self {
            query,
            clock,
            interval,
            disconnect_notify: DisconnectNotify::Always,
        }
    }

    /// Configures when entering the disconnected state notifies.
    #[must_use]
    pub const fn with_disconnect_notify(mut self, policy: DisconnectNotify) -> Self {
        self.disconnect_notify = policy;
        self
    }

    /// Returns the configured polling interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the configured disconnect notification policy.
    #[must_use]
    pub const fn disconnect_notify(&self) -> DisconnectNotify {
        self.disconnect_notify
    }

    /// Converts this monitor into a stream of reports.
    ///
    /// The first tick fires immediately, so the initial state is reported
    /// at startup. The stream never terminates on its own; use `take_until`
    /// or `select!` with a shutdown signal to stop it.
    #[must_use]
    pub fn into_stream(self) -> LinkStream<Q, C> {
        LinkStream::new(
            self.query,
            self.clock,
            self.interval,
            self.disconnect_notify,
        )
    }
}
