//! Validation of raw platform records into [`InterfaceRecord`] values.
//!
//! Bad entries never fail a whole population: a malformed address, MAC, or
//! GUID is dropped with a warning and the rest of the interface is kept.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use thiserror::Error;

use super::{AdapterGuid, InterfaceAddress, InterfaceRecord, RawAddress, RawInterface, RecordError};
use crate::address::{AddressError, AddressFamily, Ipv6Address, decode_ipv4, decode_ipv6};
use crate::mac::MacAddress;

#[derive(Debug, Error)]
enum ConvertError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Interface names keyed by index, for naming IPv6 scopes.
type ScopeNames = HashMap<u32, String>;

/// Converts a platform listing, in order.
///
/// A nonzero IPv6 scope id that matches the index of any interface in the
/// listing is also given that interface's name.
pub fn convert_interfaces(raw: Vec<RawInterface>) -> Vec<InterfaceRecord> {
    let mut scope_names = ScopeNames::with_capacity(raw.len());
    for interface in raw.iter().filter(|i| i.index != 0) {
        scope_names
            .entry(interface.index)
            .or_insert_with(|| interface.name.clone());
    }

    raw.into_iter()
        .map(|interface| convert_interface(interface, &scope_names))
        .collect()
}

/// Converts one raw interface, skipping any malformed parts.
fn convert_interface(raw: RawInterface, scope_names: &ScopeNames) -> InterfaceRecord {
    let mut builder = InterfaceRecord::builder(raw.index, raw.name.as_str()).flags(raw.flags);

    if let Some(mtu) = raw.mtu {
        builder = builder.mtu(mtu);
    }

    if let Some(bytes) = raw.mac.as_deref() {
        match MacAddress::from_bytes(bytes) {
            Ok(mac) => builder = builder.mac(mac),
            Err(e) => {
                tracing::warn!(interface = %raw.name, error = %e, "Skipping hardware address");
            }
        }
    }

    if let Some(text) = raw.platform_uuid.as_deref() {
        match text.parse::<AdapterGuid>() {
            Ok(guid) => builder = builder.platform_uuid(guid),
            Err(e) => tracing::warn!(interface = %raw.name, error = %e, "Skipping adapter GUID"),
        }
    }

    for address in &raw.addresses {
        match address.family {
            Some(AddressFamily::V4) => match convert_ipv4(address) {
                Ok(record) => builder = builder.ipv4(record),
                Err(e) => {
                    tracing::warn!(interface = %raw.name, error = %e, "Skipping IPv4 address");
                }
            },
            Some(AddressFamily::V6) => match convert_ipv6(address, scope_names) {
                Ok(record) => builder = builder.ipv6(record),
                Err(e) => {
                    tracing::warn!(interface = %raw.name, error = %e, "Skipping IPv6 address");
                }
            },
            None => tracing::trace!(interface = %raw.name, "Ignoring address of unmodelled family"),
        }
    }

    builder.build()
}

fn convert_ipv4(raw: &RawAddress) -> Result<InterfaceAddress<Ipv4Addr>, ConvertError> {
    let broadcast = raw.broadcast.as_deref().map(decode_ipv4).transpose()?;
    let peer = raw.peer.as_deref().map(decode_ipv4).transpose()?;
    Ok(InterfaceAddress::try_new(
        decode_ipv4(&raw.bytes)?,
        raw.prefix_length,
        broadcast,
        peer,
        raw.flags,
    )?)
}

fn convert_ipv6(
    raw: &RawAddress,
    scope_names: &ScopeNames,
) -> Result<InterfaceAddress<Ipv6Address>, ConvertError> {
    let decode_unscoped = |bytes: &[u8]| decode_ipv6(bytes, None);
    let broadcast = raw.broadcast.as_deref().map(decode_unscoped).transpose()?;
    let peer = raw.peer.as_deref().map(decode_unscoped).transpose()?;

    let mut address = decode_ipv6(&raw.bytes, raw.scope_id)?;
    if let Some(name) = address.scope_id().and_then(|id| scope_names.get(&id)) {
        address = address.with_scope_name(name.as_str());
    }

    Ok(InterfaceAddress::try_new(
        address,
        raw.prefix_length,
        broadcast,
        peer,
        raw.flags,
    )?)
}
