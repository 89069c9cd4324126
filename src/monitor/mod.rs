//! Monitor layer: deciding what to report about the watched adapter.
//!
//! This module provides types and functions for:
//! - Classifying raw samples ([`AdapterState`], [`classify`])
//! - Formatting link speeds ([`format_speed`])
//! - Detecting transitions and deciding reports ([`TransitionEngine`], [`Report`])
//! - Polling-based monitoring ([`PollingMonitor`], [`LinkStream`])

mod poller;
mod report;
mod speed;
mod state;
mod transition;

pub use crate::network::SPEED_UNKNOWN;
pub use poller::{LinkStream, PollingMonitor};
pub use report::{IconClass, LOG_TIMESTAMP_FORMAT, LogEntry, OneShot, Report};
pub use speed::format_speed;
pub use state::{AdapterState, Phase, classify};
pub use transition::{
    DisconnectNotify, GIGABIT, NOTIFY_DISCONNECTED, ONE_SHOT_MIN_VISIBLE, STATUS_DISCONNECTED,
    STATUS_NO_ADAPTER, TransitionEngine,
};
