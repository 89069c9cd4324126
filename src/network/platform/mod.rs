//! Platform-specific adapter table implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`LinkFetcher`](super::LinkFetcher) trait.
//!
//! # Platform Support
//!
//! - **Windows**: Uses `GetAdaptersAddresses` API via the `windows` crate.
//! - **Linux**: Reads `/sys/class/net`.
//! - **Elsewhere**: [`UnsupportedFetcher`], which always fails.

#[cfg(target_os = "linux")]
mod linux;
mod unsupported;
#[cfg(windows)]
mod windows;

#[cfg(target_os = "linux")]
pub use linux::SysfsFetcher;
pub use unsupported::UnsupportedFetcher;
#[cfg(windows)]
pub use windows::WindowsFetcher;

// Re-export platform-specific fetcher as PlatformFetcher for convenience
#[cfg(target_os = "linux")]
pub use linux::SysfsFetcher as PlatformFetcher;

#[cfg(windows)]
pub use windows::WindowsFetcher as PlatformFetcher;

#[cfg(not(any(target_os = "linux", windows)))]
pub use unsupported::UnsupportedFetcher as PlatformFetcher;
