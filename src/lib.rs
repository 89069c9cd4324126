//! Speed Notifier: network adapter link monitor
//!
//! A library for watching a single network adapter's link state and
//! negotiated speed, and reporting every transition through a status
//! indicator, a timestamped log and optional webhook notifications.
//!
//! Data flows through the layers once per tick:
//! [`network`] samples the adapter, [`monitor`] classifies the sample and
//! decides what to report, and [`notify`] renders the report.

pub mod config;
pub mod monitor;
pub mod network;
pub mod notify;
pub mod time;
