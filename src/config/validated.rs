//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use handlebars::Handlebars;
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use url::Url;

use crate::monitor::DisconnectNotify;
use crate::network::HardwareId;
use crate::notify::RetryPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// MAC address of the watched adapter (required)
    pub hardware_id: HardwareId,

    /// Polling interval
    pub poll_interval: Duration,

    /// Disconnect notification policy
    pub disconnect_notify: DisconnectNotify,

    /// One-shot webhook; `None` when no URL is configured
    pub webhook: Option<WebhookConfig>,

    /// Dry-run mode (log one-shots without sending webhooks)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

/// Validated webhook settings.
#[derive(Debug)]
pub struct WebhookConfig {
    /// Target URL
    pub url: Url,

    /// HTTP method
    pub method: Method,

    /// Extra headers, including `Authorization` for a bearer token
    pub headers: HeaderMap,

    /// Handlebars body template; JSON body when `None`
    pub body_template: Option<String>,

    /// Retry policy for failed deliveries
    pub retry_policy: RetryPolicy,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disconnect_notify = match self.disconnect_notify {
            DisconnectNotify::Always => "always",
            DisconnectNotify::AfterConnected => "after-connected",
        };

        write!(
            f,
            "Config {{ mac: {}, poll_interval: {}s, disconnect_notify: {}, ",
            self.hardware_id,
            self.poll_interval.as_secs(),
            disconnect_notify,
        )?;

        match &self.webhook {
            Some(webhook) => write!(
                f,
                "webhook: {} {}, retry: {}x/{}s, ",
                webhook.method,
                webhook.url,
                webhook.retry_policy.max_attempts,
                webhook.retry_policy.initial_delay.as_secs(),
            )?,
            None => f.write_str("webhook: none, ")?,
        }

        write!(f, "dry_run: {} }}", self.dry_run)
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The MAC address is missing or malformed
    /// - The poll interval is zero
    /// - The disconnect policy is unknown
    /// - Webhook settings (URL, method, headers, template, retry) are invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let hardware_id = Self::resolve_hardware_id(cli, toml)?;
        let poll_interval = Self::resolve_poll_interval(cli, toml)?;
        let disconnect_notify = Self::resolve_disconnect_notify(cli, toml)?;
        let webhook = Self::resolve_webhook(cli, toml)?;

        Ok(Self {
            hardware_id,
            poll_interval,
            disconnect_notify,
            webhook,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_hardware_id(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<HardwareId, ConfigError> {
        let mac = cli
            .mac
            .as_deref()
            .or_else(|| toml.and_then(|t| t.adapter.mac.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::MAC, "Use --mac or set adapter.mac in config file")
            })?;

        Ok(mac.parse::<HardwareId>()?)
    }

    fn resolve_poll_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .poll_interval
            .or_else(|| toml.and_then(|t| t.monitor.poll_interval))
            .unwrap_or(defaults::POLL_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_disconnect_notify(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<DisconnectNotify, ConfigError> {
        if let Some(arg) = cli.disconnect_notify {
            return Ok(arg.into());
        }

        toml.and_then(|t| t.monitor.disconnect_notify.as_deref())
            .map_or(Ok(DisconnectNotify::default()), parse_disconnect_notify)
    }

    fn resolve_webhook(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<WebhookConfig>, ConfigError> {
        let Some(url_str) = cli
            .webhook_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.url.as_deref()))
        else {
            return Ok(None);
        };

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(WebhookConfig {
            url,
            method: Self::resolve_method(cli, toml)?,
            headers: Self::resolve_headers(cli, toml)?,
            body_template: Self::resolve_body_template(cli, toml)?,
            retry_policy: Self::build_retry_policy(cli, toml)?,
        }))
    }

    fn resolve_method(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Method, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let method_str = cli
            .method
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.method.as_deref()))
            .unwrap_or(defaults::METHOD);

        method_str
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(method_str.to_string()))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // TOML first so CLI can override
        if let Some(toml) = toml {
            for (name, value) in &toml.webhook.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        let bearer = cli
            .bearer
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.bearer.as_deref()));

        if let Some(token) = bearer {
            let auth_value = format!("Bearer {token}");
            let header_value = parse_header_value("Authorization", &auth_value)?;
            headers.insert(AUTHORIZATION, header_value);
        }

        Ok(headers)
    }

    fn resolve_body_template(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<String>, ConfigError> {
        let template = cli
            .body_template
            .clone()
            .or_else(|| toml.and_then(|t| t.webhook.body_template.clone()));

        if let Some(ref tmpl) = template {
            Handlebars::new()
                .render_template(tmpl, &serde_json::json!({}))
                .map_err(|e| ConfigError::InvalidTemplate {
                    reason: e.to_string(),
                })?;
        }

        Ok(template)
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_secs = cli
            .retry_delay
            .or_else(|| retry.and_then(|r| r.initial_delay))
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_SECS);

        let max_delay_secs = retry
            .and_then(|r| r.max_delay)
            .unwrap_or(defaults::RETRY_MAX_DELAY_SECS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if initial_delay_secs == 0 {
            return Err(ConfigError::InvalidRetry(
                "initial_delay must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay_secs < initial_delay_secs {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay ({max_delay_secs}s) must be >= initial_delay ({initial_delay_secs}s)"
            )));
        }

        Ok(RetryPolicy {
            max_attempts,
            initial_delay: Duration::from_secs(initial_delay_secs),
            max_delay: Duration::from_secs(max_delay_secs),
            multiplier,
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_disconnect_notify(s: &str) -> Result<DisconnectNotify, ConfigError> {
    match s.to_lowercase().as_str() {
        "always" => Ok(DisconnectNotify::Always),
        "after-connected" | "after_connected" => Ok(DisconnectNotify::AfterConnected),
        _ => Err(ConfigError::InvalidDisconnectNotify {
            value: s.to_string(),
        }),
    }
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::MalformedHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeader {
            header: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader {
        header: name.to_string(),
        reason: e.to_string(),
    })
}
