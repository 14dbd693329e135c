//! Lazily populated, cached view of the machine's network interfaces.
//!
//! # Lifecycle
//!
//! ```text
//! construct ──▶ acquired ──first read──▶ populated ──close()──▶ closed
//!                  │                                              ▲
//!                  └──────────────────close()─────────────────────┘
//! ```
//!
//! A failed population leaves the browser in the acquired state; the next
//! read tries again.

mod error;
mod interface_browser;
mod snapshot;

pub use error::BrowserError;
pub use interface_browser::InterfaceBrowser;
pub use snapshot::Snapshot;
