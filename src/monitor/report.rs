//! Report bundle describing every observable effect of one transition.

use std::fmt;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local, TimeZone, Utc};

use super::AdapterState;

/// Sortable timestamp layout used for log lines (`2026-10-19T08:30:00`).
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Indicator icon to show for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconClass {
    /// No adapter, or adapter without a link.
    NotConnected,
    /// Connected below gigabit.
    Degraded,
    /// Connected at gigabit or faster.
    Good,
}

impl IconClass {
    /// Stable lower-case name, used in logs and webhook payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotConnected => "not-connected",
            Self::Degraded => "degraded",
            Self::Good => "good",
        }
    }
}

impl fmt::Display for IconClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient, dismissible message shown on qualifying transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShot {
    /// Message body.
    pub body: String,
    /// Minimum time the message stays visible.
    pub min_visible: Duration,
}

/// One timestamped line in the status log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// When the line was produced.
    pub timestamp: SystemTime,
    /// The logged text.
    pub text: String,
}

impl LogEntry {
    /// Creates a log entry.
    #[must_use]
    pub fn new(timestamp: SystemTime, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }

    /// Renders the entry as `timestamp<TAB>text` in the given time zone.
    #[must_use]
    pub fn render_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let stamp = DateTime::<Utc>::from(self.timestamp).with_timezone(tz);
        format!("{}\t{}", stamp.format(LOG_TIMESTAMP_FORMAT), self.text)
    }
}

impl fmt::Display for LogEntry {
    /// Renders in local time.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_in(&Local))
    }
}

/// Everything one reported transition requires the outside world to do.
///
/// Produced by [`super::TransitionEngine::on_tick`]; applying it to the
/// indicator, notification and log sinks is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The state that was entered.
    pub state: AdapterState,
    /// Persistent status text for the indicator.
    pub status_text: String,
    /// Indicator icon.
    pub icon: IconClass,
    /// One-shot notification, if this transition warrants one.
    pub one_shot: Option<OneShot>,
    /// Log line for the status log.
    pub log: LogEntry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn icon_names_are_stable() {
        assert_eq!(IconClass::NotConnected.to_string(), "not-connected");
        assert_eq!(IconClass::Degraded.to_string(), "degraded");
        assert_eq!(IconClass::Good.to_string(), "good");
    }

    #[test]
    fn log_entry_renders_sortable_utc_timestamp() {
        let entry = LogEntry::new(
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            "Speed: 1.0 Gbps",
        );

        assert_eq!(entry.render_in(&Utc), "2023-11-14T22:13:20\tSpeed: 1.0 Gbps");
    }

    #[test]
    fn log_entry_honours_time_zone() {
        let entry = LogEntry::new(SystemTime::UNIX_EPOCH, "Startup.");
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(entry.render_in(&plus_two), "1970-01-01T02:00:00\tStartup.");
    }

    #[test]
    fn log_entry_display_ends_with_text() {
        let entry = LogEntry::new(SystemTime::now(), "Disconnected.");
        let rendered = entry.to_string();

        assert!(rendered.ends_with("\tDisconnected."));
        assert_eq!(rendered.split('\t').next().unwrap().len(), 19);
    }
}
