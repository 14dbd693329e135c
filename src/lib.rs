//! ifbrowse: a read-only view of the machine's network interfaces
//!
//! A library for enumerating network interfaces with their flags, hardware
//! addresses, and bound IPv4/IPv6 addresses, rendered the way `ifconfig`
//! would show them.
//!
//! # Example
//!
//! ```no_run
//! use ifbrowse::InterfaceBrowser;
//!
//! let browser = InterfaceBrowser::new()?;
//! browser.for_each(|interface| {
//!     println!("{interface}");
//!     true
//! })?;
//! # Ok::<(), ifbrowse::BrowserError>(())
//! ```

pub mod address;
pub mod browser;
pub mod config;
pub mod error;
pub mod flags;
pub mod mac;
pub mod network;
pub mod samples;

pub use address::{AddressFamily, IpAddress, Ipv6Address};
pub use browser::{BrowserError, InterfaceBrowser, Snapshot};
pub use error::IllegalStateError;
pub use mac::{MacAddress, MacAddressError};
pub use network::{InterfaceAddress, InterfaceRecord};
