//! Named, cross-platform view of interface and address flag bits.
//!
//! Every platform reports interface state as a bitmask, but the bit values
//! (and which bits exist at all) differ. This module maps a fixed vocabulary
//! of symbolic flags onto the running target's values:
//!
//! - [`INTERFACE_FLAGS`] covers link state (`up`, `running`, `loopback`, ...)
//! - [`ADDRESS_FLAGS`] covers per-address state (`autoconf`, `temporary`, ...)
//!
//! Tables are selected at compile time. A flag the target does not know
//! resolves to [`UNSUPPORTED_FLAG`] and is never reported as enabled.
//!
//! # Examples
//!
//! ```
//! use ifbrowse::flags::{INTERFACE_FLAGS, InterfaceFlag, UNSUPPORTED_FLAG};
//!
//! let up = INTERFACE_FLAGS.resolve(InterfaceFlag::Up);
//! assert_ne!(up, UNSUPPORTED_FLAG);
//!
//! let mask = INTERFACE_FLAGS.mask_of(InterfaceFlag::Up);
//! assert!(INTERFACE_FLAGS.is_enabled(mask, InterfaceFlag::Up));
//! ```

mod address;
mod interface;

use std::fmt;

pub use address::{ADDRESS_FLAGS, AddressFlag};
pub use interface::{INTERFACE_FLAGS, InterfaceFlag};

/// Bit value of a flag the running platform does not support.
///
/// Real flag bits are non-negative, so the sentinel never collides with one.
pub const UNSUPPORTED_FLAG: i64 = -1;

/// A symbolic flag vocabulary.
pub trait Flag: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every flag in declaration order.
    const ALL: &'static [Self];

    /// Stable lower-case symbolic name.
    fn name(self) -> &'static str;
}

/// One row of a platform flag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagEntry<F> {
    /// The symbolic flag.
    pub flag: F,
    /// Native bit value, or [`UNSUPPORTED_FLAG`].
    pub bit: i64,
    /// Short tag used when rendering a mask.
    pub token: &'static str,
}

impl<F> FlagEntry<F> {
    pub(crate) const fn new(flag: F, bit: i64, token: &'static str) -> Self {
        Self { flag, bit, token }
    }

    pub(crate) const fn unsupported(flag: F, token: &'static str) -> Self {
        Self::new(flag, UNSUPPORTED_FLAG, token)
    }

    /// Returns true if the platform has a bit for this flag.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.bit != UNSUPPORTED_FLAG
    }
}

/// Resolves symbolic flags to the running platform's bit values.
#[derive(Debug)]
pub struct FlagRegistry<F: 'static> {
    entries: &'static [FlagEntry<F>],
}

impl<F: Flag> FlagRegistry<F> {
    pub(crate) const fn new(entries: &'static [FlagEntry<F>]) -> Self {
        Self { entries }
    }

    /// Returns the table rows in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &'static [FlagEntry<F>] {
        self.entries
    }

    fn entry(&self, flag: F) -> Option<&'static FlagEntry<F>> {
        self.entries.iter().find(|entry| entry.flag == flag)
    }

    /// Returns the native bit value of `flag`, or [`UNSUPPORTED_FLAG`].
    #[must_use]
    pub fn resolve(&self, flag: F) -> i64 {
        self.entry(flag).map_or(UNSUPPORTED_FLAG, |entry| entry.bit)
    }

    /// Resolves a symbolic name such as `"up"` or `"temporary"`.
    ///
    /// Returns `None` for a name outside the vocabulary, and
    /// `Some(UNSUPPORTED_FLAG)` for a known flag the platform lacks.
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> Option<i64> {
        F::ALL
            .iter()
            .find(|flag| flag.name().eq_ignore_ascii_case(name))
            .map(|&flag| self.resolve(flag))
    }

    /// Returns the bit of `flag` as a mask, or 0 when unsupported.
    #[must_use]
    pub fn mask_of(&self, flag: F) -> u32 {
        u32::try_from(self.resolve(flag)).unwrap_or(0)
    }

    /// Returns true if every bit of `flag` is set in `mask`.
    ///
    /// Always false for a flag the platform does not support.
    #[must_use]
    pub fn is_enabled(&self, mask: u32, flag: F) -> bool {
        let bit = self.resolve(flag);
        bit > 0 && (i64::from(mask) & bit) == bit
    }

    /// Returns the flags enabled in `mask`, in declaration order.
    pub fn enabled(&self, mask: u32) -> impl Iterator<Item = F> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.bit > 0 && (i64::from(mask) & entry.bit) == entry.bit)
            .map(|entry| entry.flag)
    }

    /// Returns the display tokens of the flags enabled in `mask`.
    #[must_use]
    pub fn display_tokens(&self, mask: u32) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|entry| entry.bit > 0 && (i64::from(mask) & entry.bit) == entry.bit)
            .map(|entry| entry.token)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_table_complete<F: Flag>(registry: &FlagRegistry<F>) {
        assert_eq!(registry.entries().len(), F::ALL.len());
        for (entry, flag) in registry.entries().iter().zip(F::ALL) {
            assert_eq!(entry.flag, *flag, "table order must follow declaration order");
            assert!(!entry.token.is_empty());
        }
    }

    fn assert_bits_distinct<F: Flag>(registry: &FlagRegistry<F>) {
        let supported: Vec<i64> = registry
            .entries()
            .iter()
            .filter(|entry| entry.is_supported())
            .map(|entry| entry.bit)
            .collect();

        for (i, bit) in supported.iter().enumerate() {
            assert!(*bit > 0);
            assert_eq!(bit.count_ones(), 1, "{bit:#x} is not a single bit");
            assert!(!supported[i + 1..].contains(bit), "{bit:#x} appears twice");
        }
    }

    #[test]
    fn interface_table_is_complete_and_ordered() {
        assert_table_complete(&INTERFACE_FLAGS);
    }

    #[test]
    fn address_table_is_complete_and_ordered() {
        assert_table_complete(&ADDRESS_FLAGS);
    }

    #[test]
    fn supported_bits_are_distinct_single_bits() {
        assert_bits_distinct(&INTERFACE_FLAGS);
        assert_bits_distinct(&ADDRESS_FLAGS);
    }

    #[test]
    fn names_are_unique() {
        for (i, flag) in InterfaceFlag::ALL.iter().enumerate() {
            assert!(
                InterfaceFlag::ALL[i + 1..]
                    .iter()
                    .all(|other| other.name() != flag.name())
            );
        }
        for (i, flag) in AddressFlag::ALL.iter().enumerate() {
            assert!(
                AddressFlag::ALL[i + 1..]
                    .iter()
                    .all(|other| other.name() != flag.name())
            );
        }
    }

    #[test]
    fn resolve_name_matches_resolve() {
        for flag in InterfaceFlag::ALL {
            assert_eq!(
                INTERFACE_FLAGS.resolve_name(flag.name()),
                Some(INTERFACE_FLAGS.resolve(*flag))
            );
        }
    }

    #[test]
    fn resolve_name_is_case_insensitive() {
        assert_eq!(
            ADDRESS_FLAGS.resolve_name("TEMPORARY"),
            Some(ADDRESS_FLAGS.resolve(AddressFlag::Temporary))
        );
    }

    #[test]
    fn resolve_name_unknown_is_none() {
        assert_eq!(INTERFACE_FLAGS.resolve_name("warp-drive"), None);
        assert_eq!(ADDRESS_FLAGS.resolve_name(""), None);
    }

    #[test]
    fn sentinel_is_never_enabled() {
        for entry in INTERFACE_FLAGS.entries() {
            if !entry.is_supported() {
                assert!(!INTERFACE_FLAGS.is_enabled(u32::MAX, entry.flag));
                assert_eq!(INTERFACE_FLAGS.mask_of(entry.flag), 0);
            }
        }
    }

    #[test]
    fn every_supported_flag_is_enabled_by_full_mask() {
        for entry in INTERFACE_FLAGS.entries().iter().filter(|e| e.is_supported()) {
            assert!(INTERFACE_FLAGS.is_enabled(u32::MAX, entry.flag));
        }
    }

    #[test]
    fn empty_mask_enables_nothing() {
        assert!(INTERFACE_FLAGS.display_tokens(0).is_empty());
        assert_eq!(ADDRESS_FLAGS.enabled(0).count(), 0);
    }

    #[test]
    fn address_flags_use_bsd_values_everywhere() {
        assert_eq!(ADDRESS_FLAGS.resolve(AddressFlag::Anycast), 0x1);
        assert_eq!(ADDRESS_FLAGS.resolve(AddressFlag::Tentative), 0x2);
        assert_eq!(ADDRESS_FLAGS.resolve(AddressFlag::Deprecated), 0x10);
        assert_eq!(ADDRESS_FLAGS.resolve(AddressFlag::AutoConfigured), 0x40);
        assert_eq!(ADDRESS_FLAGS.resolve(AddressFlag::Temporary), 0x80);
        assert_eq!(ADDRESS_FLAGS.resolve(AddressFlag::Secured), 0x400);
    }

    #[test]
    fn address_tokens_follow_declaration_order() {
        let mask = ADDRESS_FLAGS.mask_of(AddressFlag::Secured)
            | ADDRESS_FLAGS.mask_of(AddressFlag::AutoConfigured);
        assert_eq!(ADDRESS_FLAGS.display_tokens(mask), vec!["autoconf", "secured"]);
    }

    #[test]
    fn up_and_running_are_supported_everywhere() {
        let mask = INTERFACE_FLAGS.mask_of(InterfaceFlag::Up)
            | INTERFACE_FLAGS.mask_of(InterfaceFlag::Running);
        assert_eq!(INTERFACE_FLAGS.display_tokens(mask), vec!["UP", "RUNNING"]);
        assert_eq!(
            INTERFACE_FLAGS.enabled(mask).collect::<Vec<_>>(),
            vec![InterfaceFlag::Up, InterfaceFlag::Running]
        );
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn linux_values() {
        assert_eq!(INTERFACE_FLAGS.resolve(InterfaceFlag::Up), 0x1);
        assert_eq!(INTERFACE_FLAGS.resolve(InterfaceFlag::Loopback), 0x8);
        assert_eq!(INTERFACE_FLAGS.resolve(InterfaceFlag::Multicast), 0x1000);
        assert_eq!(INTERFACE_FLAGS.resolve(InterfaceFlag::Master), 0x400);
        assert_eq!(INTERFACE_FLAGS.resolve(InterfaceFlag::Simplex), UNSUPPORTED_FLAG);
        assert_eq!(
            INTERFACE_FLAGS.resolve(InterfaceFlag::TxInProgress),
            UNSUPPORTED_FLAG
        );
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn linux_values_match_libc() {
        let pairs = [
            (InterfaceFlag::Up, libc::IFF_UP),
            (InterfaceFlag::Broadcast, libc::IFF_BROADCAST),
            (InterfaceFlag::Loopback, libc::IFF_LOOPBACK),
            (InterfaceFlag::PointToPoint, libc::IFF_POINTOPOINT),
            (InterfaceFlag::Running, libc::IFF_RUNNING),
            (InterfaceFlag::Promiscuous, libc::IFF_PROMISC),
            (InterfaceFlag::Multicast, libc::IFF_MULTICAST),
        ];
        for (flag, value) in pairs {
            assert_eq!(INTERFACE_FLAGS.resolve(flag), i64::from(value), "{flag:?}");
        }
    }

    #[cfg(windows)]
    #[test]
    fn windows_synthesizes_link_flags_only() {
        assert_ne!(INTERFACE_FLAGS.resolve(InterfaceFlag::Loopback), UNSUPPORTED_FLAG);
        assert_eq!(INTERFACE_FLAGS.resolve(InterfaceFlag::Debug), UNSUPPORTED_FLAG);
        assert_eq!(INTERFACE_FLAGS.resolve(InterfaceFlag::Slave), UNSUPPORTED_FLAG);
    }
}
