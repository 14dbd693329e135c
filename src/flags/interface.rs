//! Interface-level flags (`IFF_*`).

use serde::Serialize;

use super::{Flag, FlagEntry, FlagRegistry};

/// Link-level state of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceFlag {
    /// Administratively up.
    Up,
    /// Resources allocated and operational.
    Running,
    /// Loopback interface.
    Loopback,
    /// Point-to-point link.
    PointToPoint,
    /// Broadcast address is valid.
    Broadcast,
    /// Supports multicast.
    Multicast,
    /// Driver debugging enabled.
    Debug,
    /// Receives all packets.
    Promiscuous,
    /// Receives all multicast packets.
    AllMulticast,
    /// No address resolution protocol.
    NoArp,
    /// Avoids trailer encapsulation.
    NoTrailers,
    /// Transmission in progress.
    TxInProgress,
    /// Cannot hear its own transmissions.
    Simplex,
    /// Master of a load balancer or bond.
    Master,
    /// Slave of a load balancer or bond.
    Slave,
}

impl Flag for InterfaceFlag {
    const ALL: &'static [Self] = &[
        Self::Up,
        Self::Running,
        Self::Loopback,
        Self::PointToPoint,
        Self::Broadcast,
        Self::Multicast,
        Self::Debug,
        Self::Promiscuous,
        Self::AllMulticast,
        Self::NoArp,
        Self::NoTrailers,
        Self::TxInProgress,
        Self::Simplex,
        Self::Master,
        Self::Slave,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Running => "running",
            Self::Loopback => "loopback",
            Self::PointToPoint => "pointopoint",
            Self::Broadcast => "broadcast",
            Self::Multicast => "multicast",
            Self::Debug => "debug",
            Self::Promiscuous => "promisc",
            Self::AllMulticast => "allmulti",
            Self::NoArp => "noarp",
            Self::NoTrailers => "notrailers",
            Self::TxInProgress => "oactive",
            Self::Simplex => "simplex",
            Self::Master => "master",
            Self::Slave => "slave",
        }
    }
}

/// Interface flag values of the running platform.
pub static INTERFACE_FLAGS: FlagRegistry<InterfaceFlag> = FlagRegistry::new(ENTRIES);

use InterfaceFlag as I;

// <linux/if.h>
#[cfg(any(target_os = "linux", target_os = "android"))]
const ENTRIES: &[FlagEntry<InterfaceFlag>] = &[
    FlagEntry::new(I::Up, 0x1, "UP"),
    FlagEntry::new(I::Running, 0x40, "RUNNING"),
    FlagEntry::new(I::Loopback, 0x8, "LOOPBACK"),
    FlagEntry::new(I::PointToPoint, 0x10, "POINTOPOINT"),
    FlagEntry::new(I::Broadcast, 0x2, "BROADCAST"),
    FlagEntry::new(I::Multicast, 0x1000, "MULTICAST"),
    FlagEntry::new(I::Debug, 0x4, "DEBUG"),
    FlagEntry::new(I::Promiscuous, 0x100, "PROMISC"),
    FlagEntry::new(I::AllMulticast, 0x200, "ALLMULTI"),
    FlagEntry::new(I::NoArp, 0x80, "NOARP"),
    FlagEntry::new(I::NoTrailers, 0x20, "NOTRAILERS"),
    FlagEntry::unsupported(I::TxInProgress, "OACTIVE"),
    FlagEntry::unsupported(I::Simplex, "SIMPLEX"),
    FlagEntry::new(I::Master, 0x400, "MASTER"),
    FlagEntry::new(I::Slave, 0x800, "SLAVE"),
];

// <net/if.h>
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
const ENTRIES: &[FlagEntry<InterfaceFlag>] = &[
    FlagEntry::new(I::Up, 0x1, "UP"),
    FlagEntry::new(I::Running, 0x40, "RUNNING"),
    FlagEntry::new(I::Loopback, 0x8, "LOOPBACK"),
    FlagEntry::new(I::PointToPoint, 0x10, "POINTOPOINT"),
    FlagEntry::new(I::Broadcast, 0x2, "BROADCAST"),
    FlagEntry::new(I::Multicast, 0x8000, "MULTICAST"),
    FlagEntry::new(I::Debug, 0x4, "DEBUG"),
    FlagEntry::new(I::Promiscuous, 0x100, "PROMISC"),
    FlagEntry::new(I::AllMulticast, 0x200, "ALLMULTI"),
    FlagEntry::new(I::NoArp, 0x80, "NOARP"),
    FlagEntry::new(I::NoTrailers, 0x20, "SMART"),
    FlagEntry::new(I::TxInProgress, 0x400, "OACTIVE"),
    FlagEntry::new(I::Simplex, 0x800, "SIMPLEX"),
    FlagEntry::unsupported(I::Master, "MASTER"),
    FlagEntry::unsupported(I::Slave, "SLAVE"),
];

// Windows has no interface flag word; the backend synthesizes this mask.
#[cfg(windows)]
const ENTRIES: &[FlagEntry<InterfaceFlag>] = &[
    FlagEntry::new(I::Up, 0x1, "UP"),
    FlagEntry::new(I::Running, 0x20, "RUNNING"),
    FlagEntry::new(I::Loopback, 0x4, "LOOPBACK"),
    FlagEntry::new(I::PointToPoint, 0x8, "POINTOPOINT"),
    FlagEntry::new(I::Broadcast, 0x2, "BROADCAST"),
    FlagEntry::new(I::Multicast, 0x10, "MULTICAST"),
    FlagEntry::unsupported(I::Debug, "DEBUG"),
    FlagEntry::unsupported(I::Promiscuous, "PROMISC"),
    FlagEntry::unsupported(I::AllMulticast, "ALLMULTI"),
    FlagEntry::unsupported(I::NoArp, "NOARP"),
    FlagEntry::unsupported(I::NoTrailers, "NOTRAILERS"),
    FlagEntry::unsupported(I::TxInProgress, "OACTIVE"),
    FlagEntry::unsupported(I::Simplex, "SIMPLEX"),
    FlagEntry::unsupported(I::Master, "MASTER"),
    FlagEntry::unsupported(I::Slave, "SLAVE"),
];

#[cfg(not(any(
    windows,
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
)))]
const ENTRIES: &[FlagEntry<InterfaceFlag>] = &[
    FlagEntry::unsupported(I::Up, "UP"),
    FlagEntry::unsupported(I::Running, "RUNNING"),
    FlagEntry::unsupported(I::Loopback, "LOOPBACK"),
    FlagEntry::unsupported(I::PointToPoint, "POINTOPOINT"),
    FlagEntry::unsupported(I::Broadcast, "BROADCAST"),
    FlagEntry::unsupported(I::Multicast, "MULTICAST"),
    FlagEntry::unsupported(I::Debug, "DEBUG"),
    FlagEntry::unsupported(I::Promiscuous, "PROMISC"),
    FlagEntry::unsupported(I::AllMulticast, "ALLMULTI"),
    FlagEntry::unsupported(I::NoArp, "NOARP"),
    FlagEntry::unsupported(I::NoTrailers, "NOTRAILERS"),
    FlagEntry::unsupported(I::TxInProgress, "OACTIVE"),
    FlagEntry::unsupported(I::Simplex, "SIMPLEX"),
    FlagEntry::unsupported(I::Master, "MASTER"),
    FlagEntry::unsupported(I::Slave, "SLAVE"),
];
