//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, error hints and the
//! adapter listing output that support the main entry point.

use speed_notifier::config::{ConfigError, field};
use speed_notifier::monitor::format_speed;
use speed_notifier::network::{LinkRecord, SPEED_UNKNOWN};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing required fields, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - adapter table failure, stream failure, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::MAC => {
            eprintln!("\nRun 'speed-notifier list' to find the MAC address of your adapter.");
            eprintln!("Run 'speed-notifier init' to generate a configuration template.");
        }
        ConfigError::InvalidHardwareId(_) => {
            eprintln!("\nRun 'speed-notifier list' to see the MAC addresses on this machine.");
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'speed-notifier init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Formats one row of the `list` output.
pub fn format_link_row(record: &LinkRecord) -> String {
    let mac = record
        .hardware_id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let state = match record.enabled {
        Some(true) => "up",
        Some(false) => "down",
        None => "?",
    };
    let speed = match record.speed_bps {
        Some(0 | SPEED_UNKNOWN) | None => "-".to_string(),
        Some(bps) => format_speed(bps),
    };

    format!("{:<17}  {:<4}  {:>12}  {}", mac, state, speed, record.name)
}
