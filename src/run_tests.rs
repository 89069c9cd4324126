//! Tests for the run module.

use super::*;
use speed_notifier::config::Cli;
use speed_notifier::monitor::{AdapterState, IconClass, OneShot};
use speed_notifier::notify::DeliveryError;
use std::sync::Mutex;
use std::time::SystemTime;

fn report(state: AdapterState, status: &str, one_shot: Option<&str>) -> Report {
    Report {
        state,
        status_text: status.to_string(),
        icon: IconClass::NotConnected,
        one_shot: one_shot.map(|body| OneShot {
            body: body.to_string(),
            min_visible: Duration::from_secs(5),
        }),
        log: LogEntry::new(SystemTime::UNIX_EPOCH, status),
    }
}

fn disconnected() -> Report {
    report(
        AdapterState::DISCONNECTED,
        "Waiting for connection...",
        Some("Disconnected."),
    )
}

#[derive(Debug, Default, Clone)]
struct RecordingIndicator {
    shown: Arc<Mutex<Vec<String>>>,
    flashed: Arc<Mutex<Vec<String>>>,
}

impl Indicator for RecordingIndicator {
    fn show(&self, status_text: &str, _icon: IconClass) {
        self.shown.lock().unwrap().push(status_text.to_string());
    }

    fn flash(&self, one_shot: &OneShot) {
        self.flashed.lock().unwrap().push(one_shot.body.clone());
    }
}

/// Sender recording delivered status texts; reports whose status matches
/// `slow_status` take `delay` to deliver, as if backing off between retries.
#[derive(Debug, Default, Clone)]
struct RecordingSender {
    sent: Arc<Mutex<Vec<String>>>,
    slow_status: Option<&'static str>,
    delay: Duration,
}

impl RecordingSender {
    fn slow_for(status: &'static str, delay: Duration) -> Self {
        Self {
            slow_status: Some(status),
            delay,
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl OneShotSender for RecordingSender {
    async fn send(&self, report: &Report) -> Result<(), DeliveryError> {
        if self.slow_status == Some(report.status_text.as_str()) {
            tokio::time::sleep(self.delay).await;
        }
        self.sent.lock().unwrap().push(report.status_text.clone());
        Ok(())
    }
}

struct FixedClock(SystemTime);

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

mod run_error {
    use super::*;

    #[test]
    fn stream_terminated_displays_message() {
        let error = RunError::StreamTerminated;
        assert_eq!(error.to_string(), "Monitor stream terminated unexpectedly");
    }
}

mod runtime_options {
    use super::*;

    #[test]
    fn from_config_extracts_fields() {
        let cli = Cli::parse_from_iter([
            "speed-notifier",
            "--mac",
            "00:11:22:33:44:55",
            "--poll-interval",
            "7",
            "--disconnect-notify",
            "after-connected",
            "--dry-run",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();
        let options = RuntimeOptions::from(&config);

        assert_eq!(options.hardware_id.to_string(), "00:11:22:33:44:55");
        assert_eq!(options.poll_interval, Duration::from_secs(7));
        assert_eq!(options.disconnect_notify, DisconnectNotify::AfterConnected);
        assert!(options.dry_run);
    }
}

mod startup {
    use super::*;

    #[test]
    fn writes_startup_lines_in_order() {
        let log = LogBook::new();
        let id: HardwareId = "aa:bb:cc:dd:ee:ff".parse().unwrap();

        log_startup(&log, id, &FixedClock(SystemTime::UNIX_EPOCH));

        let texts: Vec<_> = log.entries().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["Startup.", "MAC configured: AA:BB:CC:DD:EE:FF"]);
    }

    #[test]
    fn create_webhook_uses_config() {
        let cli = Cli::parse_from_iter([
            "speed-notifier",
            "--mac",
            "00:11:22:33:44:55",
            "--webhook-url",
            "https://hooks.example.com/link",
            "--method",
            "PUT",
            "--retry-max",
            "4",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();
        let webhook = create_webhook(config.webhook.as_ref().unwrap());

        assert_eq!(webhook.url().as_str(), "https://hooks.example.com/link");
        assert_eq!(*webhook.method(), http::Method::PUT);
        assert_eq!(webhook.retry_policy().max_attempts, 4);
    }
}

mod delivery {
    use super::*;

    fn connected() -> Report {
        report(
            AdapterState::connected(1_000_000_000),
            "Speed: 1.0 Gbps",
            Some("Adapter speed: 1.0 Gbps"),
        )
    }

    #[tokio::test]
    async fn delivers_one_shot_before_shutdown_returns() {
        let sender = RecordingSender::default();
        let delivery = Delivery::new(Some(sender.clone()), false);

        delivery.dispatch(&disconnected());
        delivery.shutdown(Duration::from_secs(1)).await;

        assert_eq!(sender.sent(), vec!["Waiting for connection..."]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_delivery_is_not_overtaken() {
        let sender =
            RecordingSender::slow_for("Waiting for connection...", Duration::from_secs(5));
        let delivery = Delivery::new(Some(sender.clone()), false);

        delivery.dispatch(&disconnected());
        delivery.dispatch(&connected());
        delivery.shutdown(Duration::from_secs(30)).await;

        assert_eq!(
            sender.sent(),
            vec!["Waiting for connection...", "Speed: 1.0 Gbps"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_abandons_deliveries_past_grace() {
        let sender =
            RecordingSender::slow_for("Waiting for connection...", Duration::from_secs(60));
        let delivery = Delivery::new(Some(sender.clone()), false);

        delivery.dispatch(&disconnected());
        delivery.dispatch(&connected());
        delivery.shutdown(Duration::from_secs(1)).await;

        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn reports_without_one_shot_are_not_sent() {
        let sender = RecordingSender::default();
        let delivery = Delivery::new(Some(sender.clone()), false);

        delivery.dispatch(&report(AdapterState::NO_ADAPTER, "Cannot find adapter.", None));
        delivery.shutdown(Duration::from_secs(1)).await;

        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn dry_run_never_sends() {
        let sender = RecordingSender::default();
        let delivery = Delivery::new(Some(sender.clone()), true);

        assert!(matches!(delivery, Delivery::DryRun));
        delivery.dispatch(&disconnected());
        delivery.shutdown(Duration::from_secs(1)).await;

        assert!(sender.sent().is_empty());
    }

    #[test]
    fn no_sender_is_disabled() {
        let delivery = Delivery::new::<RecordingSender>(None, false);
        assert!(matches!(delivery, Delivery::Disabled));
    }
}

mod run_loop_fn {
    use super::*;

    #[tokio::test]
    async fn applies_every_report_until_stream_ends() {
        let indicator = RecordingIndicator::default();
        let notifier = Notifier::new(indicator.clone(), Arc::new(LogBook::new()));
        let delivery = Delivery::new::<RecordingSender>(None, false);
        let reports = tokio_stream::iter(vec![
            report(AdapterState::NO_ADAPTER, "Cannot find adapter.", None),
            disconnected(),
        ]);

        let result = run_loop(reports, &notifier, &delivery, std::future::pending()).await;

        assert!(matches!(result, Err(RunError::StreamTerminated)));
        assert_eq!(
            *indicator.shown.lock().unwrap(),
            vec!["Cannot find adapter.", "Waiting for connection..."]
        );
        assert_eq!(*indicator.flashed.lock().unwrap(), vec!["Disconnected."]);
        assert_eq!(notifier.log().len(), 2);
    }

    #[tokio::test]
    async fn shutdown_wins_over_pending_reports() {
        let indicator = RecordingIndicator::default();
        let notifier = Notifier::new(indicator.clone(), Arc::new(LogBook::new()));
        let delivery = Delivery::new::<RecordingSender>(None, false);
        let reports = tokio_stream::iter(vec![report(
            AdapterState::NO_ADAPTER,
            "Cannot find adapter.",
            None,
        )]);

        let result = run_loop(reports, &notifier, &delivery, async {}).await;

        assert!(result.is_ok());
        assert!(indicator.shown.lock().unwrap().is_empty());
        assert!(notifier.log().is_empty());
    }
}
