//! Address-level flags (`IN6_IFF_*`).
//!
//! The values come from the BSD `<netinet6/in6_var.h>` and are used on every
//! platform. Linux and Windows backends translate their own address state
//! into this encoding.

use serde::Serialize;

use super::{Flag, FlagEntry, FlagRegistry};

/// Per-address state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressFlag {
    /// Configured by stateless autoconfiguration.
    AutoConfigured,
    /// Still usable but should not be chosen for new connections.
    Deprecated,
    /// Cryptographically generated interface identifier.
    Secured,
    /// Privacy (temporary) address.
    Temporary,
    /// Anycast address.
    Anycast,
    /// The link it was configured on may no longer be attached.
    Detached,
    /// Duplicate address detection failed.
    Duplicated,
    /// Assigned by DHCP.
    Dynamic,
    /// Optimistic duplicate address detection.
    Optimistic,
    /// Duplicate address detection still in progress.
    Tentative,
    /// Duplicate address detection is not performed.
    NoDad,
}

impl Flag for AddressFlag {
    const ALL: &'static [Self] = &[
        Self::AutoConfigured,
        Self::Deprecated,
        Self::Secured,
        Self::Temporary,
        Self::Anycast,
        Self::Detached,
        Self::Duplicated,
        Self::Dynamic,
        Self::Optimistic,
        Self::Tentative,
        Self::NoDad,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::AutoConfigured => "autoconf",
            Self::Deprecated => "deprecated",
            Self::Secured => "secured",
            Self::Temporary => "temporary",
            Self::Anycast => "anycast",
            Self::Detached => "detached",
            Self::Duplicated => "duplicated",
            Self::Dynamic => "dynamic",
            Self::Optimistic => "optimistic",
            Self::Tentative => "tentative",
            Self::NoDad => "nodad",
        }
    }
}

/// Address flag values, shared by every platform.
pub static ADDRESS_FLAGS: FlagRegistry<AddressFlag> = FlagRegistry::new(&[
    FlagEntry::new(AddressFlag::AutoConfigured, 0x40, "autoconf"),
    FlagEntry::new(AddressFlag::Deprecated, 0x10, "deprecated"),
    FlagEntry::new(AddressFlag::Secured, 0x400, "secured"),
    FlagEntry::new(AddressFlag::Temporary, 0x80, "temporary"),
    FlagEntry::new(AddressFlag::Anycast, 0x1, "anycast"),
    FlagEntry::new(AddressFlag::Detached, 0x8, "detached"),
    FlagEntry::new(AddressFlag::Duplicated, 0x4, "duplicated"),
    FlagEntry::new(AddressFlag::Dynamic, 0x100, "dynamic"),
    FlagEntry::new(AddressFlag::Optimistic, 0x200, "optimistic"),
    FlagEntry::new(AddressFlag::Tentative, 0x2, "tentative"),
    FlagEntry::new(AddressFlag::NoDad, 0x20, "nodad"),
]);
