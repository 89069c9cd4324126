//! Applies reports to the local sinks.

use std::sync::Arc;

use super::{Indicator, LogBook};
use crate::monitor::Report;

/// Renders each [`Report`] on the indicator and appends it to the log.
///
/// Remote one-shot delivery is handled separately by the caller, since
/// it is asynchronous and may be slow.
#[derive(Debug)]
pub struct Notifier<I> {
    indicator: I,
    log: Arc<LogBook>,
}

impl<I: Indicator> Notifier<I> {
    /// Creates a notifier writing to `indicator` and `log`.
    #[must_use]
    pub const fn new(indicator: I, log: Arc<LogBook>) -> Self {
        Self { indicator, log }
    }

    /// Returns the log this notifier appends to.
    #[must_use]
    pub const fn log(&self) -> &Arc<LogBook> {
        &self.log
    }

    /// Updates the indicator, flashes the one-shot if any, and logs.
    pub fn apply(&self, report: &Report) {
        self.indicator.show(&report.status_text, report.icon);
        if let Some(one_shot) = &report.one_shot {
            self.indicator.flash(one_shot);
        }
        self.log.append(report.log.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{AdapterState, IconClass, LogEntry, OneShot};
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime};

    #[derive(Debug, Default)]
    struct RecordingIndicator {
        shown: Mutex<Vec<(String, IconClass)>>,
        flashed: Mutex<Vec<String>>,
    }

    impl Indicator for &RecordingIndicator {
        fn show(&self, status_text: &str, icon: IconClass) {
            self.shown
                .lock()
                .unwrap()
                .push((status_text.to_string(), icon));
        }

        fn flash(&self, one_shot: &OneShot) {
            self.flashed.lock().unwrap().push(one_shot.body.clone());
        }
    }

    fn report(one_shot: Option<&str>) -> Report {
        Report {
            state: AdapterState::DISCONNECTED,
            status_text: "Waiting for connection...".to_string(),
            icon: IconClass::NotConnected,
            one_shot: one_shot.map(|body| OneShot {
                body: body.to_string(),
                min_visible: Duration::from_secs(5),
            }),
            log: LogEntry::new(SystemTime::UNIX_EPOCH, "Waiting for connection..."),
        }
    }

    #[test]
    fn apply_updates_indicator_and_log() {
        let indicator = RecordingIndicator::default();
        let notifier = Notifier::new(&indicator, Arc::new(LogBook::new()));

        notifier.apply(&report(Some("Disconnected.")));

        assert_eq!(
            *indicator.shown.lock().unwrap(),
            vec![("Waiting for connection...".to_string(), IconClass::NotConnected)]
        );
        assert_eq!(*indicator.flashed.lock().unwrap(), vec!["Disconnected."]);
        assert_eq!(notifier.log().entries(), vec![report(None).log]);
    }

    #[test]
    fn apply_without_one_shot_does_not_flash() {
        let indicator = RecordingIndicator::default();
        let notifier = Notifier::new(&indicator, Arc::new(LogBook::new()));

        notifier.apply(&report(None));

        assert_eq!(indicator.shown.lock().unwrap().len(), 1);
        assert!(indicator.flashed.lock().unwrap().is_empty());
        assert_eq!(notifier.log().len(), 1);
    }
}
