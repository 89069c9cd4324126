//! Persistent status indicator boundary.

use crate::monitor::{IconClass, OneShot};

/// Renders the persistent status and transient one-shot messages.
///
/// The real tray icon is platform plumbing outside this crate; anything
/// that can show a line of text and an icon class can implement this.
pub trait Indicator: Send + Sync {
    /// Replaces the persistent status text and icon.
    fn show(&self, status_text: &str, icon: IconClass);

    /// Displays a one-shot notification.
    fn flash(&self, one_shot: &OneShot);
}

/// [`Indicator`] rendering to the `tracing` log.
///
/// Suits headless runs where the log is the only user-facing surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingIndicator;

impl Indicator for TracingIndicator {
    fn show(&self, status_text: &str, icon: IconClass) {
        tracing::info!(icon = %icon, "{status_text}");
    }

    fn flash(&self, one_shot: &OneShot) {
        tracing::warn!(
            visible_secs = one_shot.min_visible.as_secs(),
            "Notification: {}",
            one_shot.body
        );
    }
}
