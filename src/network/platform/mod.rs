//! Platform-specific [`InterfaceFetcher`](super::InterfaceFetcher) implementations.
//!
//! # Platform Support
//!
//! - **Windows**: Uses `GetAdaptersAddresses` API via the `windows` crate.
//! - **Linux, Android, macOS, iOS, BSDs**: Uses `getifaddrs` via `libc`.
//!
//! [`PlatformFetcher`] names the backend for the compilation target.

#[cfg(unix)]
mod in6_flags;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::{IfAddrs, UnixFetcher};
#[cfg(windows)]
pub use windows::{AdapterBuffer, WindowsFetcher};

/// The fetcher for the compilation target.
#[cfg(unix)]
pub type PlatformFetcher = UnixFetcher;

/// The fetcher for the compilation target.
#[cfg(windows)]
pub type PlatformFetcher = WindowsFetcher;
