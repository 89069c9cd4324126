//! The `speed-notifier.toml` file format.
//!
//! Mirrors the CLI flags section by section. Every key is optional here;
//! [`super::ValidatedConfig`] decides what is required once the CLI has
//! been merged in. Unknown keys are rejected so typos surface at startup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Contents of a config file, before merging and validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    /// `[adapter]`
    pub adapter: AdapterSection,
    /// `[monitor]`
    pub monitor: MonitorSection,
    /// `[webhook]`
    pub webhook: WebhookSection,
    /// `[retry]`
    pub retry: RetrySection,
}

/// `[adapter]`: which interface to watch.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterSection {
    /// Same forms as `--mac`.
    pub mac: Option<String>,
}

/// `[monitor]`: sampling and notification policy.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Seconds between samples.
    pub poll_interval: Option<u64>,
    /// `always` or `after-connected`.
    pub disconnect_notify: Option<String>,
}

/// `[webhook]`: where one-shots are posted. Ignored without `url`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    pub url: Option<String>,
    pub method: Option<String>,
    /// `[webhook.headers]` table; `--header` flags win on name clashes.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// Handlebars source for the request body.
    pub body_template: Option<String>,
}

/// `[retry]`: backoff for failed webhook deliveries. Delays are seconds.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    pub max_attempts: Option<u32>,
    pub initial_delay: Option<u64>,
    pub max_delay: Option<u64>,
    pub multiplier: Option<f64>,
}

impl TomlConfig {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileRead`] when the file is unreadable,
    /// [`ConfigError::TomlParse`] when its contents are rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_owned(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parses file contents.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TomlParse`] on syntax errors, unknown keys or
    /// mistyped values.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

const TEMPLATE: &str = r#"# speed-notifier configuration
#
# Command-line flags override anything set here.

[adapter]
# The adapter to watch, by MAC address. Required.
# `speed-notifier list` prints the MACs on this machine.
# mac = "00:11:22:33:44:55"

[monitor]
# Seconds between samples.
poll_interval = 1

# Which disconnects raise a notification:
#   "always"           every time the link goes away, including at startup
#   "after-connected"  only when a link that was up drops
# disconnect_notify = "always"

[webhook]
# Leave `url` unset to keep notifications local.
# url = "https://hooks.example.com/link"
# method = "POST"
# bearer = "token"

# Without a template the body is a JSON object with these fields:
#   status, message, icon, state, speed_bps, speed, timestamp
# Each is also available to the template as {{name}}.
# body_template = '{"text": "{{message}}"}'

# [webhook.headers]
# X-Source = "speed-notifier"

[retry]
# Attempts per notification, then exponential backoff between them.
# max_attempts = 3
# initial_delay = 5
# max_delay = 60
# multiplier = 2.0
"#;

/// Returns the commented file written by `speed-notifier init`.
#[must_use]
pub fn default_config_template() -> String {
    TEMPLATE.to_string()
}
