//! Polling stream implementation.
//!
//! This module provides [`LinkStream`], a stream that samples the watched
//! adapter on every interval tick and yields a report for each transition.

use super::super::{AdapterState, DisconnectNotify, Report, TransitionEngine, classify};
use crate::network::AdapterQuery;
use crate::time::Clock;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tokio_stream::Stream;

/// A stream of transition reports produced by polling.
///
/// Returned by [`super::PollingMonitor::into_stream`]. Each tick runs
/// `sample → classify → on_tick` to completion; ticks that repeat the last
/// reported state yield nothing.
pub struct LinkStream<Q, C> {
    query: Q,
    engine: TransitionEngine<C>,
    interval: Interval,
}

impl<Q, C> LinkStream<Q, C>
where
    Q: AdapterQuery,
    C: Clock,
{
    pub(super) fn new(
        query: Q,
        clock: C,
        poll_interval: Duration,
        disconnect_notify: DisconnectNotify,
    ) -> Self {
        let mut interval = interval(poll_interval);
        // A slow query pushes the schedule back instead of bursting
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            query,
            engine: TransitionEngine::with_clock(clock).with_disconnect_notify(disconnect_notify),
            interval,
        }
    }

    /// Runs one tick and returns the report, if the state changed.
    fn tick(&mut self) -> Option<Report> {
        let snapshot = self.query.sample();
        self.engine.on_tick(classify(snapshot))
    }

    /// Returns the last reported state, or `None` before the first report.
    #[must_use]
    pub const fn last_state(&self) -> Option<AdapterState> {
        self.engine.last_state()
    }
}

impl<Q, C> Stream for LinkStream<Q, C>
where
    Q: AdapterQuery + Unpin,
    C: Clock + Unpin,
{
    type Item = Report;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            // Poll the interval timer - registers waker for next tick when Pending
            if Pin::new(&mut self.interval).poll_tick(cx).is_pending() {
                return Poll::Pending;
            }

            if let Some(report) = self.tick() {
                return Poll::Ready(Some(report));
            }
            // Unchanged - loop back to re-register waker via poll_tick
        }
    }
}
