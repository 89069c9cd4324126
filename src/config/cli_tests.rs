//! Tests for CLI argument parsing.

use super::cli::{Cli, Command, DisconnectNotifyArg};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::parse_from_iter(["speed-notifier", "--mac", "00:11:22:33:44:55"]);

        assert_eq!(cli.mac.as_deref(), Some("00:11:22:33:44:55"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_monitor_options() {
        let cli = Cli::parse_from_iter([
            "speed-notifier",
            "--poll-interval",
            "5",
            "--disconnect-notify",
            "after-connected",
        ]);

        assert_eq!(cli.poll_interval, Some(5));
        assert_eq!(
            cli.disconnect_notify,
            Some(DisconnectNotifyArg::AfterConnected)
        );
    }

    #[test]
    fn parse_webhook_options() {
        let cli = Cli::parse_from_iter([
            "speed-notifier",
            "--webhook-url",
            "https://hooks.example.com/link",
            "--method",
            "PUT",
            "--header",
            "X-Api-Key=secret",
            "--header",
            "Content-Type: application/json",
            "--bearer",
            "token123",
            "--body-template",
            r#"{"text":"{{message}}"}"#,
        ]);

        assert_eq!(
            cli.webhook_url.as_deref(),
            Some("https://hooks.example.com/link")
        );
        assert_eq!(cli.method.as_deref(), Some("PUT"));
        assert_eq!(
            cli.headers,
            vec!["X-Api-Key=secret", "Content-Type: application/json"]
        );
        assert_eq!(cli.bearer.as_deref(), Some("token123"));
        assert_eq!(cli.body_template.as_deref(), Some(r#"{"text":"{{message}}"}"#));
    }

    #[test]
    fn parse_retry_options() {
        let cli = Cli::parse_from_iter(["speed-notifier", "--retry-max", "5", "--retry-delay", "10"]);

        assert_eq!(cli.retry_max, Some(5));
        assert_eq!(cli.retry_delay, Some(10));
    }

    #[test]
    fn parse_misc_options() {
        let cli = Cli::parse_from_iter([
            "speed-notifier",
            "-c",
            "/path/to/config.toml",
            "--dry-run",
            "-v",
        ]);

        assert_eq!(
            cli.config.as_ref().unwrap().to_str(),
            Some("/path/to/config.toml")
        );
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from_iter(["speed-notifier"]);

        assert!(cli.mac.is_none());
        assert!(cli.poll_interval.is_none());
        assert!(cli.disconnect_notify.is_none());
        assert!(cli.webhook_url.is_none());
        assert!(cli.method.is_none());
        assert!(cli.headers.is_empty());
        assert!(cli.retry_max.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn rejects_unknown_disconnect_policy() {
        let result =
            Cli::try_parse_from_iter(["speed-notifier", "--disconnect-notify", "never"]);
        assert!(result.is_err());
    }
}

mod subcommands {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_init_with_default_output() {
        let cli = Cli::parse_from_iter(["speed-notifier", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("speed-notifier.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_init_with_custom_output() {
        let cli = Cli::parse_from_iter(["speed-notifier", "init", "-o", "/custom/config.toml"]);

        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("/custom/config.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_list() {
        let cli = Cli::parse_from_iter(["speed-notifier", "list"]);

        assert!(cli.is_list());
        assert!(!cli.is_init());
    }

    #[test]
    fn run_mode_has_no_command() {
        let cli = Cli::parse_from_iter(["speed-notifier", "--mac", "001122334455"]);

        assert!(!cli.is_init());
        assert!(!cli.is_list());
    }
}

mod disconnect_notify_arg {
    use super::*;
    use crate::monitor::DisconnectNotify;

    #[test]
    fn converts_to_policy() {
        assert_eq!(
            DisconnectNotify::from(DisconnectNotifyArg::Always),
            DisconnectNotify::Always
        );
        assert_eq!(
            DisconnectNotify::from(DisconnectNotifyArg::AfterConnected),
            DisconnectNotify::AfterConnected
        );
    }
}
