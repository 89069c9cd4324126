//! Network layer for reading the watched adapter.
//!
//! This module provides types and traits for:
//! - Identifying the watched adapter ([`HardwareId`])
//! - Raw adapter table rows ([`LinkRecord`]) and their source ([`LinkFetcher`])
//! - One-per-tick samples of the watched adapter ([`AdapterSnapshot`], [`AdapterQuery`])
//! - Platform-specific implementations ([`platform`])

mod adapter;
mod fetcher;
pub mod platform;
mod query;

pub use adapter::{AdapterSnapshot, HardwareId, LinkRecord, ParseHardwareIdError, SPEED_UNKNOWN};
pub use fetcher::{FetchError, LinkFetcher};
pub use query::{AdapterQuery, MatchingQuery};
