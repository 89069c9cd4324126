//! Transition detection and report decisions.

use std::time::Duration;

use super::report::{IconClass, LogEntry, OneShot, Report};
use super::speed::format_speed;
use super::state::{AdapterState, Phase};
use crate::time::{Clock, SystemClock};

/// Speeds at or above this are shown with the "good" icon.
pub const GIGABIT: u64 = 1_000_000_000;

/// Minimum visible duration of a one-shot notification.
pub const ONE_SHOT_MIN_VISIBLE: Duration = Duration::from_secs(5);

/// Status text while the adapter cannot be found.
pub const STATUS_NO_ADAPTER: &str = "Cannot find adapter.";

/// Status text while the adapter has no link.
pub const STATUS_DISCONNECTED: &str = "Waiting for connection...";

/// One-shot body sent when the link goes down.
pub const NOTIFY_DISCONNECTED: &str = "Disconnected.";

/// When entering the disconnected state fires a one-shot notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisconnectNotify {
    /// Every entry into the disconnected state notifies, including the
    /// first report after startup.
    #[default]
    Always,
    /// Only a drop from a connected link notifies. Starting up with no
    /// link, or an adapter reappearing without one, stays quiet.
    AfterConnected,
}

/// Compares each tick's state to the last reported one and decides what
/// to report.
///
/// Holds the single "last reported state" slot. The slot starts empty,
/// so the first tick always reports.
///
/// # Example
///
/// ```
/// use speed_notifier::monitor::{AdapterState, IconClass, TransitionEngine};
///
/// let mut engine = TransitionEngine::new();
///
/// let report = engine.on_tick(AdapterState::connected(1_000_000_000)).unwrap();
/// assert_eq!(report.status_text, "Speed: 1.0 Gbps");
/// assert_eq!(report.icon, IconClass::Good);
///
/// // Same state again: nothing to report
/// assert!(engine.on_tick(AdapterState::connected(1_000_000_000)).is_none());
/// ```
#[derive(Debug)]
pub struct TransitionEngine<C = SystemClock> {
    clock: C,
    disconnect_notify: DisconnectNotify,
    last: Option<AdapterState>,
}

impl TransitionEngine<SystemClock> {
    /// Creates an engine using the system clock for log timestamps.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TransitionEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TransitionEngine<C> {
    /// Creates an engine with a custom clock.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self {
            clock,
            disconnect_notify: DisconnectNotify::Always,
            last: None,
        }
    }

    /// Sets the disconnect notification policy.
    #[must_use]
    pub const fn with_disconnect_notify(mut self, policy: DisconnectNotify) -> Self {
        self.disconnect_notify = policy;
        self
    }

    /// Returns the disconnect notification policy.
    #[must_use]
    pub const fn disconnect_notify(&self) -> DisconnectNotify {
        self.disconnect_notify
    }

    /// Returns the last reported state, or `None` before the first tick.
    #[must_use]
    pub const fn last_state(&self) -> Option<AdapterState> {
        self.last
    }
}

impl<C: Clock> TransitionEngine<C> {
    /// Processes one tick's classified state.
    ///
    /// Returns `None` when `state` equals the last reported state: no
    /// log line, no indicator change, no notification. Otherwise returns
    /// the [`Report`] for the new state and remembers it.
    pub fn on_tick(&mut self, state: AdapterState) -> Option<Report> {
        if self.last == Some(state) {
            return None;
        }

        let previous = self.last.replace(state);
        tracing::debug!(?previous, current = ?state, "Adapter state changed");

        let (status_text, icon, one_shot) = decide(state, previous, self.disconnect_notify);
        let log = LogEntry::new(self.clock.now(), status_text.clone());

        Some(Report {
            state,
            status_text,
            icon,
            one_shot: one_shot.map(|body| OneShot {
                body,
                min_visible: ONE_SHOT_MIN_VISIBLE,
            }),
            log,
        })
    }
}

/// Picks status text, icon and optional one-shot body for a new state.
fn decide(
    state: AdapterState,
    previous: Option<AdapterState>,
    policy: DisconnectNotify,
) -> (String, IconClass, Option<String>) {
    match state.phase() {
        Phase::NoAdapter => (STATUS_NO_ADAPTER.to_string(), IconClass::NotConnected, None),
        Phase::Disconnected => {
            let notify = match policy {
                DisconnectNotify::Always => true,
                DisconnectNotify::AfterConnected => previous.is_some_and(|p| p.is_connected()),
            };
            (
                STATUS_DISCONNECTED.to_string(),
                IconClass::NotConnected,
                notify.then(|| NOTIFY_DISCONNECTED.to_string()),
            )
        }
        Phase::Connected(speed) => {
            let human = format_speed(speed);
            let icon = if speed >= GIGABIT {
                IconClass::Good
            } else {
                IconClass::Degraded
            };
            (
                format!("Speed: {human}"),
                icon,
                Some(format!("Adapter speed: {human}")),
            )
        }
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
