//! Configuration errors.
//!
//! Every variant is reported once at startup; the binary prints it,
//! adds a hint where one helps, and exits with code 1.

use std::path::PathBuf;

use thiserror::Error;

use crate::network::ParseHardwareIdError;

/// Why the configuration could not be assembled.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file passed with `--config` could not be read.
    #[error("Cannot read config file {}: {source}", path.display())]
    FileRead {
        /// Requested path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// `init` could not write the template.
    #[error("Cannot write config template to {}: {source}", path.display())]
    FileWrite {
        /// Target path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML, an unknown key, or a value of the wrong type.
    #[error("Config file is not valid: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A setting with no default was given neither on the command line
    /// nor in the file.
    #[error("No {field} configured. {hint}")]
    MissingRequired {
        /// Setting name, one of [`field`].
        field: &'static str,
        /// Where the user can supply it.
        hint: &'static str,
    },

    /// The adapter MAC address could not be parsed.
    #[error("Adapter MAC is malformed: {0}")]
    InvalidHardwareId(#[from] ParseHardwareIdError),

    /// Polling every zero seconds would spin.
    #[error("poll_interval must be at least 1 second")]
    InvalidPollInterval,

    #[error("disconnect_notify must be 'always' or 'after-connected', got '{value}'")]
    InvalidDisconnectNotify {
        /// Rejected value.
        value: String,
    },

    #[error("Webhook URL '{url}' does not parse: {reason}")]
    InvalidUrl {
        /// Rejected URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    #[error("'{0}' is not an HTTP method")]
    InvalidMethod(String),

    /// A `--header` argument with neither `=` nor `:` between name and value.
    #[error("Header '{value}' should look like 'Name=Value' or 'Name: Value'")]
    MalformedHeader {
        /// Rejected argument.
        value: String,
    },

    /// A header name or value that HTTP does not allow.
    #[error("Header '{header}' cannot be sent: {reason}")]
    InvalidHeader {
        /// Header name as written by the user.
        header: String,
        /// What the `http` crate rejected.
        reason: String,
    },

    /// The body template does not compile.
    #[error("Body template does not render: {reason}")]
    InvalidTemplate {
        /// Handlebars message.
        reason: String,
    },

    /// Retry settings that cannot produce a usable backoff schedule.
    #[error("Retry settings rejected: {0}")]
    InvalidRetry(String),
}

/// Names used in [`ConfigError::MissingRequired`].
pub mod field {
    /// `--mac` / `adapter.mac`.
    pub const MAC: &str = "mac";
}

impl ConfigError {
    /// Shorthand for [`ConfigError::MissingRequired`].
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
