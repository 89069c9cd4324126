//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::monitor::DisconnectNotify;

/// Speed Notifier: network adapter link monitor
///
/// Watches one network adapter, identified by its MAC address, and
/// reports every change in link state and negotiated speed.
#[derive(Debug, Parser)]
#[command(name = "speed-notifier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// MAC address of the adapter to watch (required for run mode)
    #[arg(long, value_name = "AA:BB:CC:DD:EE:FF")]
    pub mac: Option<String>,

    /// Polling interval in seconds
    #[arg(long = "poll-interval")]
    pub poll_interval: Option<u64>,

    /// When entering the disconnected state sends a notification
    #[arg(long = "disconnect-notify", value_enum)]
    pub disconnect_notify: Option<DisconnectNotifyArg>,

    /// Webhook URL that receives one-shot notifications
    #[arg(long = "webhook-url")]
    pub webhook_url: Option<String>,

    /// HTTP method for webhook requests
    #[arg(long)]
    pub method: Option<String>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V")]
    pub headers: Vec<String>,

    /// Bearer token for Authorization header
    #[arg(long)]
    pub bearer: Option<String>,

    /// Handlebars body template for webhook requests
    #[arg(long = "body-template")]
    pub body_template: Option<String>,

    /// Maximum number of delivery attempts
    #[arg(long = "retry-max")]
    pub retry_max: Option<u32>,

    /// Initial retry delay in seconds
    #[arg(long = "retry-delay")]
    pub retry_delay: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Test mode - log one-shot notifications without sending webhooks
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for speed-notifier
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "speed-notifier.toml")]
        output: PathBuf,
    },
    /// List the network adapters visible to this machine
    List,
}

/// Disconnect notification policy for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisconnectNotifyArg {
    /// Notify on every entry into the disconnected state
    #[value(name = "always")]
    Always,
    /// Notify only when a connected link goes down
    #[value(name = "after-connected")]
    AfterConnected,
}

impl From<DisconnectNotifyArg> for DisconnectNotify {
    fn from(arg: DisconnectNotifyArg) -> Self {
        match arg {
            DisconnectNotifyArg::Always => Self::Always,
            DisconnectNotifyArg::AfterConnected => Self::AfterConnected,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning clap's error
    /// instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns [`clap::Error`] for unknown flags or invalid values.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Returns true if this is the list command.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self.command, Some(Command::List))
    }
}
