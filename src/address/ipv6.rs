//! Scope-aware IPv6 address value.

use std::fmt;
use std::net::Ipv6Addr;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::{AddressError, AddressFamily, format_ipv6};

/// An IPv6 address with an optional zone (scope) qualifier.
///
/// The scope can be known by its numeric id, by an interface name, or both.
/// When rendered, the name wins over the number: `fe80::1%en5` rather than
/// `fe80::1%6`.
///
/// # Equality
///
/// Two addresses are equal when their bytes and both scope parts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv6Address {
    addr: Ipv6Addr,
    scope_id: Option<NonZeroU32>,
    scope_name: Option<String>,
}

impl Ipv6Address {
    /// Creates an unscoped address.
    #[must_use]
    pub const fn new(addr: Ipv6Addr) -> Self {
        Self {
            addr,
            scope_id: None,
            scope_name: None,
        }
    }

    /// Sets the numeric scope id. Zero clears it.
    #[must_use]
    pub fn with_scope_id(mut self, scope_id: u32) -> Self {
        self.scope_id = NonZeroU32::new(scope_id);
        self
    }

    /// Sets the scope name. An empty name clears it.
    #[must_use]
    pub fn with_scope_name(mut self, scope_name: impl Into<String>) -> Self {
        let name = scope_name.into();
        self.scope_name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Returns the address without scope.
    #[must_use]
    pub const fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    /// Returns the 16 network-order bytes of the address.
    #[must_use]
    pub const fn octets(&self) -> [u8; 16] {
        self.addr.octets()
    }

    /// Returns the numeric scope id, if one is set.
    #[must_use]
    pub fn scope_id(&self) -> Option<u32> {
        self.scope_id.map(NonZeroU32::get)
    }

    /// Returns the scope name, if one is set.
    #[must_use]
    pub fn scope_name(&self) -> Option<&str> {
        self.scope_name.as_deref()
    }

    /// Returns true if either a scope id or a scope name is set.
    #[must_use]
    pub const fn is_scoped(&self) -> bool {
        self.scope_id.is_some() || self.scope_name.is_some()
    }
}

impl From<Ipv6Addr> for Ipv6Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self::new(addr)
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_ipv6(&self.addr))?;
        if let Some(ref name) = self.scope_name {
            write!(f, "%{name}")
        } else if let Some(id) = self.scope_id {
            write!(f, "%{id}")
        } else {
            Ok(())
        }
    }
}

impl FromStr for Ipv6Address {
    type Err = AddressError;

    /// Parses `addr` or `addr%scope`, where a numeric scope becomes the
    /// scope id and anything else becomes the scope name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AddressError::InvalidFormat {
            family: AddressFamily::V6,
            input: s.to_string(),
        };

        let (addr_part, scope) = match s.split_once('%') {
            Some((_, "")) => return Err(invalid()),
            Some((_, scope)) if scope.contains('%') => return Err(invalid()),
            Some((addr, scope)) => (addr, Some(scope)),
            None => (s, None),
        };

        let address = Self::new(addr_part.parse::<Ipv6Addr>().map_err(|_| invalid())?);

        Ok(match scope {
            Some(scope) if scope.bytes().all(|b| b.is_ascii_digit()) => {
                address.with_scope_id(scope.parse().map_err(|_| invalid())?)
            }
            Some(scope) => address.with_scope_name(scope),
            None => address,
        })
    }
}

impl Serialize for Ipv6Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_scope() {
        let address = Ipv6Address::new(Ipv6Addr::LOCALHOST);
        assert_eq!(address.to_string(), "::1");
    }

    #[test]
    fn display_appends_numeric_scope() {
        let address = Ipv6Address::new("fe80::1".parse().unwrap()).with_scope_id(4);
        assert_eq!(address.to_string(), "fe80::1%4");
    }

    #[test]
    fn display_prefers_scope_name() {
        let address = Ipv6Address::new("fe80::1".parse().unwrap())
            .with_scope_id(6)
            .with_scope_name("en5");
        assert_eq!(address.to_string(), "fe80::1%en5");
    }

    #[test]
    fn zero_scope_id_is_unscoped() {
        let address = Ipv6Address::new(Ipv6Addr::LOCALHOST).with_scope_id(0);
        assert!(!address.is_scoped());
        assert_eq!(address.scope_id(), None);
        assert_eq!(address.to_string(), "::1");
    }

    #[test]
    fn parse_numeric_scope() {
        let address: Ipv6Address = "fe80::aede:48ff:fe00:1122%6".parse().unwrap();
        assert_eq!(address.scope_id(), Some(6));
        assert_eq!(address.scope_name(), None);
    }

    #[test]
    fn parse_named_scope() {
        let address: Ipv6Address = "fe80::aede:48ff:fe00:1122%en5".parse().unwrap();
        assert_eq!(address.scope_id(), None);
        assert_eq!(address.scope_name(), Some("en5"));
        assert_eq!(address.to_string(), "fe80::aede:48ff:fe00:1122%en5");
    }

    #[test]
    fn parse_rejects_empty_scope() {
        assert!("fe80::1%".parse::<Ipv6Address>().is_err());
    }

    #[test]
    fn parse_rejects_double_scope() {
        assert!("fe80::1%en0%en1".parse::<Ipv6Address>().is_err());
    }

    #[test]
    fn parse_rejects_ipv4() {
        let err = "127.0.0.1".parse::<Ipv6Address>().unwrap_err();
        assert!(err.to_string().contains("127.0.0.1"));
    }

    #[test]
    fn equality_includes_scope() {
        let plain = Ipv6Address::new("fe80::1".parse().unwrap());
        let scoped = plain.clone().with_scope_id(3);
        assert_ne!(plain, scoped);
        assert_eq!(scoped, plain.with_scope_id(3));
    }
}
