//! Classification of addresses against the IANA special-purpose registries.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;

/// The special-purpose range an address falls into.
///
/// Categories are mutually exclusive; the first matching range wins, in the
/// order the variants are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressCategory {
    /// `0.0.0.0` or `::`.
    Unspecified,
    /// `127.0.0.0/8` or `::1`.
    Loopback,
    /// `169.254.0.0/16` or `fe80::/64`.
    LinkLocal,
    /// IPv6 unique local `fc00::/7`.
    UniqueLocal,
    /// IPv6 site local `fec0::/10` (deprecated).
    SiteLocal,
    /// IPv4 private-use and shared address space.
    Private,
    /// `224.0.0.0/4` or `ff00::/8`.
    Multicast,
    /// IPv4-mapped IPv6 `::ffff:0:0/96`.
    V4Mapped,
    /// IPv4-compatible IPv6 `::/96` (deprecated).
    V4Compatible,
    /// IPv4-translated IPv6 `::ffff:0:0:0/96`.
    V4Translated,
    /// 6to4 `2002::/16`.
    SixToFour,
    /// Any other reserved range (documentation, benchmarking, future use).
    Reserved,
    /// Globally routable unicast.
    Global,
}

impl AddressCategory {
    /// Returns true for private-use ranges, including IPv6 unique and site local.
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(self, Self::Private | Self::UniqueLocal | Self::SiteLocal)
    }

    /// Returns true for every range other than global unicast.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        !matches!(self, Self::Global)
    }
}

/// Multicast scope of a multicast address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MulticastScope {
    /// Scope values 0x0 and 0xf.
    Reserved,
    /// Interface-local (IPv6 only).
    InterfaceLocal,
    /// Link-local.
    LinkLocal,
    /// Realm-local.
    RealmLocal,
    /// Admin-local (IPv6 only).
    AdminLocal,
    /// Site-local (IPv6 only).
    SiteLocal,
    /// Organization-local.
    OrganizationLocal,
    /// Global.
    Global,
    /// Unassigned scope value.
    Unassigned,
}

impl fmt::Display for MulticastScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reserved => "reserved",
            Self::InterfaceLocal => "interface-local",
            Self::LinkLocal => "link-local",
            Self::RealmLocal => "realm-local",
            Self::AdminLocal => "admin-local",
            Self::SiteLocal => "site-local",
            Self::OrganizationLocal => "organization-local",
            Self::Global => "global",
            Self::Unassigned => "unassigned",
        };
        f.write_str(name)
    }
}

/// Result of classifying an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AddressClass {
    /// The range the address falls into.
    pub category: AddressCategory,
    /// Scope, for multicast addresses only.
    pub multicast_scope: Option<MulticastScope>,
    /// The 4-bit flag field of an IPv6 multicast address.
    pub multicast_flags: Option<u8>,
}

impl AddressClass {
    const fn unicast(category: AddressCategory) -> Self {
        Self {
            category,
            multicast_scope: None,
            multicast_flags: None,
        }
    }

    /// Returns true if the address is a multicast address.
    #[must_use]
    pub const fn is_multicast(&self) -> bool {
        matches!(self.category, AddressCategory::Multicast)
    }
}

/// Classifies an IPv4 address.
#[must_use]
pub fn classify_ipv4(address: Ipv4Addr) -> AddressClass {
    let [a, b, c, _] = address.octets();

    let category = if address.is_unspecified() {
        AddressCategory::Unspecified
    } else if a == 127 {
        AddressCategory::Loopback
    } else if a == 169 && b == 254 {
        AddressCategory::LinkLocal
    } else if is_ipv4_private(a, b, c) {
        AddressCategory::Private
    } else if (224..=239).contains(&a) {
        return AddressClass {
            category: AddressCategory::Multicast,
            multicast_scope: Some(ipv4_multicast_scope(a, b, c)),
            multicast_flags: None,
        };
    } else if is_ipv4_reserved(a, b, c) {
        AddressCategory::Reserved
    } else {
        AddressCategory::Global
    };

    AddressClass::unicast(category)
}

fn is_ipv4_private(a: u8, b: u8, c: u8) -> bool {
    a == 10
        || (a == 100 && (64..=127).contains(&b))
        || (a == 172 && (16..=31).contains(&b))
        || (a == 192 && b == 0 && c == 0)
        || (a == 192 && b == 168)
        || (a == 198 && (18..=19).contains(&b))
}

fn is_ipv4_reserved(a: u8, b: u8, c: u8) -> bool {
    a == 0
        || (a == 192 && b == 0 && c == 2)
        || (a == 192 && b == 88 && c == 99)
        || (a == 198 && b == 51 && c == 100)
        || (a == 203 && b == 0 && c == 113)
        || (a == 233 && b == 252 && c == 0)
        || a >= 240
}

fn ipv4_multicast_scope(a: u8, b: u8, c: u8) -> MulticastScope {
    if a == 224 && b == 0 && c == 0 {
        MulticastScope::LinkLocal
    } else if a == 239 && b == 255 {
        MulticastScope::RealmLocal
    } else if a == 239 && (192..=195).contains(&b) {
        MulticastScope::OrganizationLocal
    } else if a != 239 {
        MulticastScope::Global
    } else {
        MulticastScope::Unassigned
    }
}

/// Classifies an IPv6 address.
#[must_use]
pub fn classify_ipv6(address: Ipv6Addr) -> AddressClass {
    let bytes = address.octets();
    let words = address.segments();

    let category = if address.is_unspecified() {
        AddressCategory::Unspecified
    } else if address.is_loopback() {
        AddressCategory::Loopback
    } else if words[0] == 0xfe80 && words[1] == 0 && words[2] == 0 && words[3] == 0 {
        AddressCategory::LinkLocal
    } else if bytes[0] & 0xfe == 0xfc {
        AddressCategory::UniqueLocal
    } else if bytes[0] == 0xfe && bytes[1] & 0xc0 == 0xc0 {
        AddressCategory::SiteLocal
    } else if bytes[0] == 0xff {
        return AddressClass {
            category: AddressCategory::Multicast,
            multicast_scope: Some(ipv6_multicast_scope(bytes[1] & 0x0f)),
            multicast_flags: Some(bytes[1] >> 4),
        };
    } else if words[..5].iter().all(|&w| w == 0) && words[5] == 0xffff {
        AddressCategory::V4Mapped
    } else if words[..6].iter().all(|&w| w == 0) {
        // :: and ::1 were matched above
        AddressCategory::V4Compatible
    } else if words[..4].iter().all(|&w| w == 0) && words[4] == 0xffff && words[5] == 0 {
        AddressCategory::V4Translated
    } else if words[0] == 0x2002 {
        AddressCategory::SixToFour
    } else if is_ipv6_reserved(&words) {
        AddressCategory::Reserved
    } else {
        AddressCategory::Global
    };

    AddressClass::unicast(category)
}

fn is_ipv6_reserved(words: &[u16; 8]) -> bool {
    let nat64 = words[0] == 0x64 && words[1] == 0xff9b;

    (nat64 && words[2..6].iter().all(|&w| w == 0))
        || (nat64 && words[2] == 1)
        || (words[0] == 0x100 && words[1..4].iter().all(|&w| w == 0))
        || (words[0] == 0x2001 && words[1] == 0)
        || (words[0] == 0x2001 && (0x20..=0x2f).contains(&words[1]))
        || (words[0] == 0x2001 && words[1] == 0xdb8)
}

const fn ipv6_multicast_scope(scope: u8) -> MulticastScope {
    match scope {
        0x0 | 0xf => MulticastScope::Reserved,
        0x1 => MulticastScope::InterfaceLocal,
        0x2 => MulticastScope::LinkLocal,
        0x3 => MulticastScope::RealmLocal,
        0x4 => MulticastScope::AdminLocal,
        0x5 => MulticastScope::SiteLocal,
        0x8 => MulticastScope::OrganizationLocal,
        0xe => MulticastScope::Global,
        _ => MulticastScope::Unassigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(s: &str) -> AddressCategory {
        classify_ipv4(s.parse().unwrap()).category
    }

    fn v6(s: &str) -> AddressCategory {
        classify_ipv6(s.parse().unwrap()).category
    }

    mod ipv4 {
        use super::*;

        #[test]
        fn special_ranges() {
            assert_eq!(v4("0.0.0.0"), AddressCategory::Unspecified);
            assert_eq!(v4("127.0.0.1"), AddressCategory::Loopback);
            assert_eq!(v4("127.255.0.9"), AddressCategory::Loopback);
            assert_eq!(v4("169.254.10.1"), AddressCategory::LinkLocal);
            assert_eq!(v4("0.1.2.3"), AddressCategory::Reserved);
            assert_eq!(v4("203.0.113.7"), AddressCategory::Reserved);
            assert_eq!(v4("250.1.1.1"), AddressCategory::Reserved);
        }

        #[test]
        fn private_ranges() {
            for address in [
                "10.1.2.3",
                "100.64.0.1",
                "172.16.0.1",
                "172.31.255.254",
                "192.0.0.8",
                "192.168.0.42",
                "198.18.0.1",
            ] {
                let category = v4(address);
                assert_eq!(category, AddressCategory::Private, "{address}");
                assert!(category.is_private());
                assert!(category.is_reserved());
            }
        }

        #[test]
        fn edges_of_private_ranges_are_global() {
            assert_eq!(v4("172.32.0.1"), AddressCategory::Global);
            assert_eq!(v4("100.128.0.1"), AddressCategory::Global);
            assert_eq!(v4("8.8.8.8"), AddressCategory::Global);
            assert!(!AddressCategory::Global.is_reserved());
        }

        #[test]
        fn multicast_scopes() {
            let scope = |s: &str| classify_ipv4(s.parse().unwrap()).multicast_scope;

            assert_eq!(scope("224.0.0.251"), Some(MulticastScope::LinkLocal));
            assert_eq!(scope("239.255.255.250"), Some(MulticastScope::RealmLocal));
            assert_eq!(scope("239.193.0.1"), Some(MulticastScope::OrganizationLocal));
            assert_eq!(scope("233.1.1.1"), Some(MulticastScope::Global));
            assert_eq!(scope("239.1.1.1"), Some(MulticastScope::Unassigned));
            assert_eq!(scope("192.168.0.1"), None);
        }
    }

    mod ipv6 {
        use super::*;

        #[test]
        fn special_ranges() {
            assert_eq!(v6("::"), AddressCategory::Unspecified);
            assert_eq!(v6("::1"), AddressCategory::Loopback);
            assert_eq!(v6("fe80::aede:48ff:fe00:1122"), AddressCategory::LinkLocal);
            assert_eq!(v6("fd12:3456::1"), AddressCategory::UniqueLocal);
            assert_eq!(v6("fec0::1"), AddressCategory::SiteLocal);
            assert_eq!(v6("::ffff:192.0.2.128"), AddressCategory::V4Mapped);
            assert_eq!(v6("::192.0.2.128"), AddressCategory::V4Compatible);
            assert_eq!(v6("::ffff:0:192.0.2.128"), AddressCategory::V4Translated);
            assert_eq!(v6("2002:c000:280::1"), AddressCategory::SixToFour);
        }

        #[test]
        fn reserved_ranges() {
            assert_eq!(v6("64:ff9b::192.0.2.1"), AddressCategory::Reserved);
            assert_eq!(v6("64:ff9b:1::1"), AddressCategory::Reserved);
            assert_eq!(v6("100::1"), AddressCategory::Reserved);
            assert_eq!(v6("2001::1dec:5396:527a:cbe0"), AddressCategory::Reserved);
            assert_eq!(v6("2001:2f::1"), AddressCategory::Reserved);
            assert_eq!(v6("2001:db8::1"), AddressCategory::Reserved);
        }

        #[test]
        fn global_unicast() {
            assert_eq!(
                v6("2001:470:2ccb:a61b:e:acf8:6736:d81e"),
                AddressCategory::Global
            );
        }

        #[test]
        fn fe80_with_nonzero_middle_is_not_link_local() {
            assert_ne!(v6("fe80:1::1"), AddressCategory::LinkLocal);
        }

        #[test]
        fn multicast_scope_and_flags() {
            let class = classify_ipv6("ff12::1".parse().unwrap());
            assert!(class.is_multicast());
            assert_eq!(class.multicast_scope, Some(MulticastScope::LinkLocal));
            assert_eq!(class.multicast_flags, Some(1));

            let global = classify_ipv6("ff0e::101".parse().unwrap());
            assert_eq!(global.multicast_scope, Some(MulticastScope::Global));
            assert_eq!(global.multicast_flags, Some(0));

            let reserved = classify_ipv6("ff0f::1".parse().unwrap());
            assert_eq!(reserved.multicast_scope, Some(MulticastScope::Reserved));
        }
    }
}
