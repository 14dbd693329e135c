//! Fixed example values.
//!
//! None of these come from the running machine. They exist so that
//! formatting and parsing can be checked against known output without a
//! native backend.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::address::Ipv6Address;
use crate::flags::{ADDRESS_FLAGS, AddressFlag, INTERFACE_FLAGS, InterfaceFlag};
use crate::mac::MacAddress;
use crate::network::{AdapterGuid, InterfaceAddress, InterfaceRecord};

/// `127.0.0.1`
#[must_use]
pub const fn ipv4_loopback() -> Ipv4Addr {
    Ipv4Addr::LOCALHOST
}

/// `::1`
#[must_use]
pub const fn ipv6_loopback() -> Ipv6Address {
    Ipv6Address::new(Ipv6Addr::LOCALHOST)
}

/// `ac:de:48:00:11:22`
#[must_use]
pub const fn mac_address() -> MacAddress {
    MacAddress::from_eui48([0xac, 0xde, 0x48, 0x00, 0x11, 0x22])
}

/// `192.168.0.42/24 broadcast 192.168.0.254`
#[must_use]
pub fn interface_ipv4_address() -> InterfaceAddress<Ipv4Addr> {
    InterfaceAddress::from_trusted(
        Ipv4Addr::new(192, 168, 0, 42),
        24,
        Some(Ipv4Addr::new(192, 168, 0, 254)),
        0,
    )
}

/// `2001:470:2ccb:a61b:e:acf8:6736:d81e/56 autoconf secured`
#[must_use]
pub fn interface_ipv6_address() -> InterfaceAddress<Ipv6Address> {
    global_ipv6(0xd81e)
}

/// `fe80::aede:48ff:fe00:1122%en5/64 secured scopeid 0x6`
#[must_use]
pub fn interface_scoped_ipv6_address() -> InterfaceAddress<Ipv6Address> {
    let address = Ipv6Address::new(Ipv6Addr::new(0xfe80, 0, 0, 0, 0xaede, 0x48ff, 0xfe00, 0x1122))
        .with_scope_id(6)
        .with_scope_name("en5");
    InterfaceAddress::from_trusted(address, 64, None, ADDRESS_FLAGS.mask_of(AddressFlag::Secured))
}

/// Interface `en0` (index 3) carrying the sample MAC, the sample IPv4
/// address, the scoped IPv6 address, and a second global IPv6 address.
#[must_use]
pub fn interface() -> InterfaceRecord {
    let flags = [
        InterfaceFlag::Up,
        InterfaceFlag::Running,
        InterfaceFlag::Broadcast,
        InterfaceFlag::Multicast,
    ]
    .into_iter()
    .fold(0, |mask, flag| mask | INTERFACE_FLAGS.mask_of(flag));

    InterfaceRecord::builder(3, "en0")
        .platform_uuid(AdapterGuid::from_u128(0x24af_9519_2a42_4f62_99fa_1ed3_147a_d90a))
        .flags(flags)
        .mtu(1500)
        .mac(mac_address())
        .ipv4(interface_ipv4_address())
        .ipv6(interface_scoped_ipv6_address())
        .ipv6(global_ipv6(0xd81f))
        .build()
}

fn global_ipv6(last_word: u16) -> InterfaceAddress<Ipv6Address> {
    let address = Ipv6Address::new(Ipv6Addr::new(
        0x2001, 0x470, 0x2ccb, 0xa61b, 0xe, 0xacf8, 0x6736, last_word,
    ));
    let flags = ADDRESS_FLAGS.mask_of(AddressFlag::AutoConfigured)
        | ADDRESS_FLAGS.mask_of(AddressFlag::Secured);
    InterfaceAddress::from_trusted(address, 56, None, flags)
}
