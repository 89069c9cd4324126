//! Linux adapter table read from sysfs (`/sys/class/net`).

use std::fs;
use std::path::{Path, PathBuf};

use crate::network::{FetchError, HardwareId, LinkFetcher, LinkRecord, SPEED_UNKNOWN};

/// Default sysfs directory listing network interfaces.
const SYSFS_NET: &str = "/sys/class/net";

/// The `speed` attribute is reported in Mbit/s.
const BITS_PER_MEGABIT: u64 = 1_000_000;

/// Linux implementation of [`LinkFetcher`] reading sysfs attributes.
///
/// For every interface directory it reads:
/// - `address`: hardware address (absent or non-Ethernet → no id)
/// - `operstate`: `up` means enabled
/// - `speed`: negotiated speed in Mbit/s, `-1` when unknown
///
/// # Example
///
/// ```no_run
/// use speed_notifier::network::{LinkFetcher, platform::SysfsFetcher};
///
/// let fetcher = SysfsFetcher::new();
/// for record in fetcher.fetch().expect("sysfs readable") {
///     println!("{}: {:?}", record.name, record.hardware_id);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SysfsFetcher {
    root: PathBuf,
}

impl SysfsFetcher {
    /// Creates a fetcher reading the real `/sys/class/net`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(SYSFS_NET)
    }

    /// Creates a fetcher reading interface directories under `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory being read.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for SysfsFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkFetcher for SysfsFetcher {
    fn fetch(&self) -> Result<Vec<LinkRecord>, FetchError> {
        let entries = fs::read_dir(&self.root).map_err(|e| FetchError::Io {
            path: self.root.display().to_string(),
            source: e,
        })?;

        let mut records: Vec<LinkRecord> = entries
            .flatten()
            .map(|entry| read_interface(&entry.path(), &entry.file_name().to_string_lossy()))
            .collect();

        // read_dir order is unspecified; sort so duplicate resolution is stable
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}

/// Reads one interface directory into a [`LinkRecord`].
fn read_interface(dir: &Path, name: &str) -> LinkRecord {
    let hardware_id = read_attr(dir, "address").and_then(|s| s.parse::<HardwareId>().ok());
    let enabled = read_attr(dir, "operstate").map(|s| parse_operstate(&s));
    let speed_bps = read_attr(dir, "speed").and_then(|s| parse_speed(&s));

    LinkRecord::new(name, hardware_id, enabled, speed_bps)
}

/// Reads a sysfs attribute, returning `None` when it is missing or unreadable.
///
/// The kernel answers `EINVAL` for `speed` while the link is down, so an
/// error here is ordinary data rather than a failure.
fn read_attr(dir: &Path, attr: &str) -> Option<String> {
    fs::read_to_string(dir.join(attr))
        .ok()
        .map(|s| s.trim().to_string())
}

fn parse_operstate(value: &str) -> bool {
    value.eq_ignore_ascii_case("up")
}

/// Converts the Mbit/s `speed` attribute to bit/s.
///
/// Negative values are the kernel's "unknown" marker.
fn parse_speed(value: &str) -> Option<u64> {
    let mbps: i64 = value.parse().ok()?;
    if mbps < 0 {
        return Some(SPEED_UNKNOWN);
    }
    Some(mbps.unsigned_abs().saturating_mul(BITS_PER_MEGABIT))
}
