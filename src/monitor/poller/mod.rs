//! Polling driver for the transition engine.
//!
//! This module provides:
//! - [`PollingMonitor`]: Builder/configuration for polling-based monitoring
//! - [`LinkStream`]: Stream that yields one [`super::Report`] per transition

mod monitor;
mod stream;

pub use monitor::PollingMonitor;
pub use stream::LinkStream;
