//! Link fetching trait and error types.

use super::LinkRecord;
use thiserror::Error;

/// Error type for adapter table reads.
///
/// Describes what went wrong without dictating recovery strategy.
/// [`super::MatchingQuery`] folds every variant into "adapter not found".
#[derive(Debug, Error)]
pub enum FetchError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// Reading the adapter table from the filesystem failed.
    #[error("Failed to read adapter table at '{path}': {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for reading the operating system's adapter table.
///
/// # Design
///
/// - This is the only effectful seam below the transition logic
/// - Enables dependency injection for testing with mock implementations
/// - Platform-specific implementations provided in [`super::platform`]
///
/// # Example
///
/// ```
/// use speed_notifier::network::{FetchError, LinkFetcher, LinkRecord};
///
/// struct FixedFetcher(Vec<LinkRecord>);
///
/// impl LinkFetcher for FixedFetcher {
///     fn fetch(&self) -> Result<Vec<LinkRecord>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let fetcher = FixedFetcher(vec![LinkRecord::new("eth0", None, Some(true), Some(100))]);
/// assert_eq!(fetcher.fetch().unwrap().len(), 1);
/// ```
pub trait LinkFetcher: Send + Sync {
    /// Fetches every adapter the operating system currently reports.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the platform lookup itself fails.
    ///
    /// # Implementation Notes
    ///
    /// - Return ALL adapters; matching is done by the caller
    /// - Order should be stable across calls so "first match wins" is stable
    /// - A speed the OS reports as unknown must be returned as
    ///   [`super::SPEED_UNKNOWN`]
    fn fetch(&self) -> Result<Vec<LinkRecord>, FetchError>;
}
