//! Sampling the configured adapter out of the full adapter table.

use super::{AdapterSnapshot, HardwareId, LinkFetcher};

/// Produces one [`AdapterSnapshot`] per call.
///
/// Implementations never fail: anything that prevents observing the
/// adapter is reported as [`AdapterSnapshot::NOT_FOUND`].
pub trait AdapterQuery: Send + Sync {
    /// Samples the watched adapter's current state.
    fn sample(&self) -> AdapterSnapshot;
}

/// [`AdapterQuery`] that picks the adapter with a given hardware id.
///
/// Duplicates are not an error: the first matching record wins.
#[derive(Debug, Clone)]
pub struct MatchingQuery<F> {
    fetcher: F,
    hardware_id: HardwareId,
}

impl<F: LinkFetcher> MatchingQuery<F> {
    /// Creates a query watching `hardware_id` through `fetcher`.
    #[must_use]
    pub const fn new(fetcher: F, hardware_id: HardwareId) -> Self {
        Self {
            fetcher,
            hardware_id,
        }
    }

    /// Returns the watched hardware id.
    #[must_use]
    pub const fn hardware_id(&self) -> HardwareId {
        self.hardware_id
    }
}

impl<F: LinkFetcher> AdapterQuery for MatchingQuery<F> {
    fn sample(&self) -> AdapterSnapshot {
        let records = match self.fetcher.fetch() {
            Ok(records) => records,
            Err(e) => {
                tracing::debug!("Adapter lookup failed, treating as not found: {e}");
                return AdapterSnapshot::NOT_FOUND;
            }
        };

        records
            .iter()
            .find(|r| r.hardware_id == Some(self.hardware_id))
            .map_or(AdapterSnapshot::NOT_FOUND, AdapterSnapshot::from)
    }
}
