//! Append-only status log.

use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

use crate::monitor::LogEntry;

/// `tracing` target the status log is written under.
pub const STATUS_LOG_TARGET: &str = "status_log";

/// Number of recent entries kept in memory by default.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Arrival-ordered log of status lines.
///
/// Every appended entry is written to the `tracing` log at `info` under
/// [`STATUS_LOG_TARGET`], rendered as `timestamp<TAB>text`. Only the most
/// recent `capacity` entries are kept in memory. Nothing is persisted
/// across restarts.
#[derive(Debug)]
pub struct LogBook {
    entries: RwLock<VecDeque<LogEntry>>,
    capacity: usize,
}

impl LogBook {
    /// Creates an empty log keeping [`DEFAULT_CAPACITY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty log keeping at most `capacity` recent entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY))),
            capacity,
        }
    }

    /// Writes the entry to the `tracing` log and keeps it in memory,
    /// evicting the oldest entry once full.
    pub fn append(&self, entry: LogEntry) {
        tracing::info!(target: STATUS_LOG_TARGET, "{entry}");
        if self.capacity == 0 {
            return;
        }

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Returns a copy of the retained entries in arrival order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Returns the number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LogBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, SystemTime};
    use tracing_subscriber::filter::LevelFilter;

    fn entry(secs: u64, text: &str) -> LogEntry {
        LogEntry::new(SystemTime::UNIX_EPOCH + Duration::from_secs(secs), text)
    }

    fn texts(log: &LogBook) -> Vec<String> {
        log.entries().into_iter().map(|e| e.text).collect()
    }

    /// Writer collecting formatted `tracing` output.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn output(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn starts_empty() {
        let log = LogBook::new();
        assert!(log.is_empty());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn keeps_arrival_order() {
        let log = LogBook::new();
        log.append(entry(3, "Startup."));
        log.append(entry(1, "Cannot find adapter."));
        log.append(entry(2, "Speed: 1.0 Gbps"));

        assert_eq!(
            texts(&log),
            vec!["Startup.", "Cannot find adapter.", "Speed: 1.0 Gbps"]
        );
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn entries_returns_snapshot() {
        let log = LogBook::new();
        log.append(entry(1, "a"));
        let snapshot = log.entries();
        log.append(entry(2, "b"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let log = LogBook::with_capacity(2);
        log.append(entry(1, "a"));
        log.append(entry(2, "b"));
        log.append(entry(3, "c"));

        assert_eq!(texts(&log), vec!["b", "c"]);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let log = LogBook::with_capacity(0);
        log.append(entry(1, "a"));

        assert!(log.is_empty());
    }

    #[test]
    fn rendered_line_is_written_at_info() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(LevelFilter::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let line = entry(1_700_000_000, "MAC configured: 00:11:22:33:44:55");
        let rendered = line.to_string();

        tracing::subscriber::with_default(subscriber, || LogBook::new().append(line));

        let output = captured.output();
        assert!(output.contains(" INFO "), "{output}");
        assert!(output.contains(STATUS_LOG_TARGET), "{output}");
        assert!(output.contains(&rendered), "{output}");
    }
}
