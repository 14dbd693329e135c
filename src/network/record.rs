//! Immutable interface and address records.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

use super::AdapterGuid;
use crate::address::{IpAddress, Ipv6Address};
use crate::error::IllegalStateError;
use crate::flags::{ADDRESS_FLAGS, AddressFlag, INTERFACE_FLAGS, InterfaceFlag};
use crate::mac::MacAddress;

/// Error type for address record construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Broadcast and point-to-point peer are mutually exclusive.
    #[error("Address {address} cannot have both a broadcast and a destination address")]
    BroadcastAndPeer {
        /// The address being constructed.
        address: String,
    },

    /// Prefix length exceeds the width of the address.
    #[error("Prefix length {prefix_length} is too long for address {address} (max {max})")]
    PrefixTooLong {
        /// The address being constructed.
        address: String,
        /// The rejected prefix length.
        prefix_length: u8,
        /// The family's maximum.
        max: u8,
    },
}

/// One address bound to an interface.
///
/// # Invariants
///
/// - `broadcast` and `peer` are never both present
/// - `prefix_length` never exceeds the family width
///
/// # Examples
///
/// ```
/// use std::net::Ipv4Addr;
/// use ifbrowse::network::InterfaceAddress;
///
/// let address = InterfaceAddress::new(Ipv4Addr::new(192, 168, 0, 42))
///     .with_prefix_length(24)
///     .and_then(|a| a.with_broadcast(Ipv4Addr::new(192, 168, 0, 255)))
///     .unwrap();
///
/// assert_eq!(address.to_string(), "192.168.0.42/24 broadcast 192.168.0.255");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceAddress<A> {
    address: A,
    prefix_length: Option<u8>,
    broadcast: Option<A>,
    peer: Option<A>,
    flags: u32,
}

impl<A: IpAddress> InterfaceAddress<A> {
    /// Creates a record with no prefix, broadcast, peer, or flags.
    #[must_use]
    pub const fn new(address: A) -> Self {
        Self {
            address,
            prefix_length: None,
            broadcast: None,
            peer: None,
            flags: 0,
        }
    }

    /// Builds a record from literal parts known to be valid.
    pub(crate) fn from_trusted(
        address: A,
        prefix_length: u8,
        broadcast: Option<A>,
        flags: u32,
    ) -> Self {
        debug_assert!(prefix_length <= A::FAMILY.max_prefix_length());
        Self {
            address,
            prefix_length: Some(prefix_length),
            broadcast,
            peer: None,
            flags,
        }
    }

    /// Creates a record from every field at once.
    ///
    /// # Errors
    ///
    /// - [`RecordError::BroadcastAndPeer`] if both `broadcast` and `peer` are given
    /// - [`RecordError::PrefixTooLong`] if the prefix exceeds the family width
    pub fn try_new(
        address: A,
        prefix_length: Option<u8>,
        broadcast: Option<A>,
        peer: Option<A>,
        flags: u32,
    ) -> Result<Self, RecordError> {
        let mut record = Self::new(address).with_flags(flags);
        if let Some(prefix_length) = prefix_length {
            record = record.with_prefix_length(prefix_length)?;
        }
        if let Some(broadcast) = broadcast {
            record = record.with_broadcast(broadcast)?;
        }
        if let Some(peer) = peer {
            record = record.with_peer(peer)?;
        }
        Ok(record)
    }

    /// Sets the prefix length.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::PrefixTooLong`] if it exceeds the family width.
    pub fn with_prefix_length(mut self, prefix_length: u8) -> Result<Self, RecordError> {
        let max = A::FAMILY.max_prefix_length();
        if prefix_length > max {
            return Err(RecordError::PrefixTooLong {
                address: self.address.to_string(),
                prefix_length,
                max,
            });
        }
        self.prefix_length = Some(prefix_length);
        Ok(self)
    }

    /// Sets the broadcast address.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::BroadcastAndPeer`] if a peer is already set.
    pub fn with_broadcast(mut self, broadcast: A) -> Result<Self, RecordError> {
        if self.peer.is_some() {
            return Err(self.both_error());
        }
        self.broadcast = Some(broadcast);
        Ok(self)
    }

    /// Sets the point-to-point peer address.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::BroadcastAndPeer`] if a broadcast is already set.
    pub fn with_peer(mut self, peer: A) -> Result<Self, RecordError> {
        if self.broadcast.is_some() {
            return Err(self.both_error());
        }
        self.peer = Some(peer);
        Ok(self)
    }

    /// Sets the address flag mask.
    #[must_use]
    pub const fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    fn both_error(&self) -> RecordError {
        RecordError::BroadcastAndPeer {
            address: self.address.to_string(),
        }
    }

    /// Returns the address.
    #[must_use]
    pub const fn address(&self) -> &A {
        &self.address
    }

    /// Returns the prefix length, if known.
    #[must_use]
    pub const fn prefix_length(&self) -> Option<u8> {
        self.prefix_length
    }

    /// Returns the broadcast address, if any.
    #[must_use]
    pub const fn broadcast(&self) -> Option<&A> {
        self.broadcast.as_ref()
    }

    /// Returns the point-to-point peer address, if any.
    #[must_use]
    pub const fn peer(&self) -> Option<&A> {
        self.peer.as_ref()
    }

    /// Returns the raw address flag mask.
    #[must_use]
    pub const fn flags(&self) -> u32 {
        self.flags
    }

    /// Returns true if `flag` is set on this address.
    #[must_use]
    pub fn is_flag_enabled(&self, flag: AddressFlag) -> bool {
        ADDRESS_FLAGS.is_enabled(self.flags, flag)
    }
}

impl<A: IpAddress> fmt::Display for InterfaceAddress<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)?;

        if let Some(prefix_length) = self.prefix_length.filter(|&p| p > 0) {
            write!(f, "/{prefix_length}")?;
        }
        if let Some(ref broadcast) = self.broadcast {
            write!(f, " broadcast {broadcast}")?;
        } else if let Some(ref peer) = self.peer {
            write!(f, " destination {peer}")?;
        }
        for token in ADDRESS_FLAGS.display_tokens(self.flags) {
            write!(f, " {token}")?;
        }
        if let Some(label) = self.address.scope_label() {
            write!(f, " scopeid {label}")?;
        }
        Ok(())
    }
}

impl<A: IpAddress + Serialize> Serialize for InterfaceAddress<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("InterfaceAddress", 6)?;
        state.serialize_field("address", &self.address)?;
        state.serialize_field("prefix_length", &self.prefix_length)?;
        state.serialize_field("broadcast", &self.broadcast)?;
        state.serialize_field("peer", &self.peer)?;
        state.serialize_field("flags", &self.flags)?;
        state.serialize_field("flag_names", &ADDRESS_FLAGS.display_tokens(self.flags))?;
        state.end()
    }
}

/// A network interface as captured in one snapshot.
///
/// Built once during population and never mutated. Address lists keep the
/// order the platform reported them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    index: u32,
    name: String,
    platform_uuid: Option<AdapterGuid>,
    flags: u32,
    mtu: Option<u64>,
    mac: Option<MacAddress>,
    ipv4: Vec<InterfaceAddress<Ipv4Addr>>,
    ipv6: Vec<InterfaceAddress<Ipv6Address>>,
}

impl InterfaceRecord {
    /// Starts building a record for the interface `index`/`name`.
    #[must_use]
    pub fn builder(index: u32, name: impl Into<String>) -> InterfaceRecordBuilder {
        InterfaceRecordBuilder {
            record: Self {
                index,
                name: name.into(),
                platform_uuid: None,
                flags: 0,
                mtu: None,
                mac: None,
                ipv4: Vec::new(),
                ipv6: Vec::new(),
            },
        }
    }

    /// Returns the interface index.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Returns the interface name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the adapter GUID.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError`] on platforms other than Windows, where
    /// adapters have no GUID.
    pub fn platform_uuid(&self) -> Result<Option<AdapterGuid>, IllegalStateError> {
        if cfg!(windows) {
            Ok(self.platform_uuid)
        } else {
            Err(IllegalStateError::unsupported_on_platform("platform UUID"))
        }
    }

    pub(crate) const fn guid(&self) -> Option<AdapterGuid> {
        self.platform_uuid
    }

    /// Returns the raw interface flag mask.
    #[must_use]
    pub const fn flags(&self) -> u32 {
        self.flags
    }

    /// Returns true if `flag` is set on this interface.
    #[must_use]
    pub fn is_flag_enabled(&self, flag: InterfaceFlag) -> bool {
        INTERFACE_FLAGS.is_enabled(self.flags, flag)
    }

    /// Returns true if the interface is administratively up.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.is_flag_enabled(InterfaceFlag::Up)
    }

    /// Returns true for loopback interfaces.
    #[must_use]
    pub fn is_loopback(&self) -> bool {
        self.is_flag_enabled(InterfaceFlag::Loopback)
    }

    /// Returns the MTU, if the platform reports one.
    #[must_use]
    pub const fn mtu(&self) -> Option<u64> {
        self.mtu
    }

    /// Returns the hardware address, if any.
    #[must_use]
    pub const fn mac(&self) -> Option<&MacAddress> {
        self.mac.as_ref()
    }

    /// Returns the IPv4 addresses in platform order.
    #[must_use]
    pub fn ipv4(&self) -> &[InterfaceAddress<Ipv4Addr>] {
        &self.ipv4
    }

    /// Returns the IPv6 addresses in platform order.
    #[must_use]
    pub fn ipv6(&self) -> &[InterfaceAddress<Ipv6Address>] {
        &self.ipv6
    }

    /// Iterates over every bound address, IPv4 first.
    pub fn ip_addrs(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.ipv4
            .iter()
            .map(|a| a.address().ip())
            .chain(self.ipv6.iter().map(|a| a.address().ip()))
    }

    /// Returns true if the interface has any address bound.
    #[must_use]
    pub fn has_addresses(&self) -> bool {
        !self.ipv4.is_empty() || !self.ipv6.is_empty()
    }
}

impl fmt::Display for InterfaceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): flags={:x}<{}>",
            self.name,
            self.index,
            self.flags,
            INTERFACE_FLAGS.display_tokens(self.flags).join(",")
        )?;
        if let Some(mtu) = self.mtu {
            write!(f, " mtu {mtu}")?;
        }
        if let Some(ref mac) = self.mac {
            write!(f, "\n        ether {mac}")?;
        }
        for address in &self.ipv4 {
            write!(f, "\n        inet  {address}")?;
        }
        for address in &self.ipv6 {
            write!(f, "\n        inet6 {address}")?;
        }
        Ok(())
    }
}

impl Serialize for InterfaceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("InterfaceRecord", 9)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("platform_uuid", &self.platform_uuid)?;
        state.serialize_field("flags", &self.flags)?;
        state.serialize_field("flag_names", &INTERFACE_FLAGS.display_tokens(self.flags))?;
        state.serialize_field("mtu", &self.mtu)?;
        state.serialize_field("mac", &self.mac)?;
        state.serialize_field("ipv4", &self.ipv4)?;
        state.serialize_field("ipv6", &self.ipv6)?;
        state.end()
    }
}

/// Builder for [`InterfaceRecord`].
#[derive(Debug, Clone)]
#[must_use]
pub struct InterfaceRecordBuilder {
    record: InterfaceRecord,
}

impl InterfaceRecordBuilder {
    /// Sets the adapter GUID.
    pub const fn platform_uuid(mut self, guid: AdapterGuid) -> Self {
        self.record.platform_uuid = Some(guid);
        self
    }

    /// Sets the interface flag mask.
    pub const fn flags(mut self, flags: u32) -> Self {
        self.record.flags = flags;
        self
    }

    /// Sets the MTU.
    pub const fn mtu(mut self, mtu: u64) -> Self {
        self.record.mtu = Some(mtu);
        self
    }

    /// Sets the hardware address.
    pub const fn mac(mut self, mac: MacAddress) -> Self {
        self.record.mac = Some(mac);
        self
    }

    /// Appends an IPv4 address.
    pub fn ipv4(mut self, address: InterfaceAddress<Ipv4Addr>) -> Self {
        self.record.ipv4.push(address);
        self
    }

    /// Appends an IPv6 address.
    pub fn ipv6(mut self, address: InterfaceAddress<Ipv6Address>) -> Self {
        self.record.ipv6.push(address);
        self
    }

    /// Finishes the record.
    pub fn build(self) -> InterfaceRecord {
        self.record
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
