//! Network layer: interface records and the native collaborators behind them.
//!
//! This module provides types and traits for:
//! - Immutable interface and address records ([`InterfaceRecord`], [`InterfaceAddress`])
//! - The native enumeration seam ([`InterfaceFetcher`]) and its raw records
//! - Platform-specific implementations ([`platform`])
//! - Filtering of listings ([`filter`])

mod convert;
mod fetcher;
pub mod filter;
mod guid;
pub mod platform;
mod record;

#[cfg(test)]
mod filter_tests;

pub(crate) use convert::convert_interfaces;
pub use fetcher::{FetchError, InterfaceFetcher, RawAddress, RawInterface};
pub use guid::{AdapterGuid, GuidParseError};
pub use record::{InterfaceAddress, InterfaceRecord, InterfaceRecordBuilder, RecordError};
