//! Address layer: raw byte decoding, canonical text forms, and classification.
//!
//! This module provides:
//! - Decoding of fixed-length native buffers ([`decode_ipv4`], [`decode_ipv6`])
//! - RFC 5952 text rendering for IPv6 ([`format_ipv6`])
//! - A scope-aware IPv6 value ([`Ipv6Address`])
//! - Special-purpose range classification ([`classify_ipv4`], [`classify_ipv6`])
//!
//! IPv4 addresses are represented by [`std::net::Ipv4Addr`] directly; the
//! standard dotted-decimal form needs no special handling.

mod classify;
mod codec;
mod error;
mod ipv6;


use std::fmt;
use std::hash::Hash;
use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

pub use classify::{AddressCategory, AddressClass, MulticastScope, classify_ipv4, classify_ipv6};
pub use codec::{
    IPV4_DATA_LENGTH, IPV6_DATA_LENGTH, IPV6_WORDS, decode_ipv4, decode_ipv6, format_ipv4,
    format_ipv6,
};
pub use error::AddressError;
pub use ipv6::Ipv6Address;

/// Address family of an interface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    /// Internet Protocol version 4.
    V4,
    /// Internet Protocol version 6.
    V6,
}

impl AddressFamily {
    /// Returns the largest valid prefix length for this family.
    #[must_use]
    pub const fn max_prefix_length(self) -> u8 {
        match self {
            Self::V4 => 32,
            Self::V6 => 128,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for std::net::Ipv4Addr {}
    impl Sealed for super::Ipv6Address {}
}

/// An address value that can be bound to an interface.
///
/// Implemented for [`Ipv4Addr`] and [`Ipv6Address`] only.
pub trait IpAddress:
    sealed::Sealed + fmt::Display + fmt::Debug + Clone + Eq + Hash + Send + Sync + 'static
{
    /// The family this address type belongs to.
    const FAMILY: AddressFamily;

    /// Returns the address without any scope information.
    fn ip(&self) -> IpAddr;

    /// Renders the address in canonical form without any scope suffix.
    fn unscoped(&self) -> String;

    /// Returns the `scopeid` label used in interface listings, present only
    /// for a positive numeric scope id.
    fn scope_label(&self) -> Option<String> {
        None
    }

    /// Classifies the address against the special-purpose registries.
    fn classify(&self) -> AddressClass;
}

impl IpAddress for Ipv4Addr {
    const FAMILY: AddressFamily = AddressFamily::V4;

    fn ip(&self) -> IpAddr {
        IpAddr::V4(*self)
    }

    fn unscoped(&self) -> String {
        format_ipv4(*self)
    }

    fn classify(&self) -> AddressClass {
        classify_ipv4(*self)
    }
}

impl IpAddress for Ipv6Address {
    const FAMILY: AddressFamily = AddressFamily::V6;

    fn ip(&self) -> IpAddr {
        IpAddr::V6(self.addr())
    }

    fn unscoped(&self) -> String {
        format_ipv6(&self.addr())
    }

    fn scope_label(&self) -> Option<String> {
        self.scope_id().map(|id| format!("0x{id:x}"))
    }

    fn classify(&self) -> AddressClass {
        classify_ipv6(self.addr())
    }
}
