//! Fallback for targets without an adapter table implementation.

use crate::network::{FetchError, LinkFetcher, LinkRecord};

/// [`LinkFetcher`] that always fails.
///
/// Used as the platform fetcher where neither sysfs nor
/// `GetAdaptersAddresses` is available, so the watched adapter is
/// reported as not found and `list` exits with an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedFetcher;

impl LinkFetcher for UnsupportedFetcher {
    fn fetch(&self) -> Result<Vec<LinkRecord>, FetchError> {
        Err(FetchError::Platform {
            message: format!(
                "reading network adapters is not supported on {}",
                std::env::consts::OS
            ),
        })
    }
}
