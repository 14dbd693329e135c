//! Adapter GUIDs as reported by Windows.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// The text is not a `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX` GUID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid adapter GUID '{input}'")]
pub struct GuidParseError {
    input: String,
}

/// The 128-bit identifier Windows assigns to every network adapter.
///
/// Parses with or without surrounding braces, in either case. Displays in
/// upper case without braces; [`AdapterGuid::braced`] adds them back.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AdapterGuid(u128);

const GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

impl AdapterGuid {
    /// Creates a GUID from its 128-bit value.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Returns the 128-bit value.
    #[must_use]
    pub const fn as_u128(self) -> u128 {
        self.0
    }

    /// Returns the `{...}` form used in adapter names.
    #[must_use]
    pub fn braced(self) -> String {
        format!("{{{self}}}")
    }
}

impl FromStr for AdapterGuid {
    type Err = GuidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GuidParseError {
            input: s.to_string(),
        };

        let inner = match s.strip_prefix('{') {
            Some(rest) => rest.strip_suffix('}').ok_or_else(invalid)?,
            None => s,
        };

        let groups: Vec<&str> = inner.split('-').collect();
        if groups.len() != GROUP_LENGTHS.len() {
            return Err(invalid());
        }

        let mut value = 0u128;
        for (group, expected) in groups.iter().zip(GROUP_LENGTHS) {
            if group.len() != expected || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let part = u64::from_str_radix(group, 16).map_err(|_| invalid())?;
            value = (value << (expected * 4)) | u128::from(part);
        }

        Ok(Self(value))
    }
}

impl fmt::Display for AdapterGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:04X}-{:012X}",
            v >> 96,
            (v >> 80) & 0xFFFF,
            (v >> 64) & 0xFFFF,
            (v >> 48) & 0xFFFF,
            v & 0xFFFF_FFFF_FFFF
        )
    }
}

impl fmt::Debug for AdapterGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdapterGuid({self})")
    }
}

impl Serialize for AdapterGuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "4D36E972-E325-11CE-BFC1-08002BE10318";

    #[test]
    fn parses_plain_form() {
        let guid: AdapterGuid = TEXT.parse().unwrap();
        assert_eq!(guid.as_u128(), 0x4D36_E972_E325_11CE_BFC1_0800_2BE1_0318);
        assert_eq!(guid.to_string(), TEXT);
    }

    #[test]
    fn parses_braced_lowercase_form() {
        let guid: AdapterGuid = "{4d36e972-e325-11ce-bfc1-08002be10318}".parse().unwrap();
        assert_eq!(guid.to_string(), TEXT);
        assert_eq!(guid.braced(), format!("{{{TEXT}}}"));
    }

    #[test]
    fn display_keeps_leading_zeros() {
        let guid = AdapterGuid::from_u128(1);
        assert_eq!(guid.to_string(), "00000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn rejects_malformed_text() {
        for input in [
            "",
            "{4D36E972-E325-11CE-BFC1-08002BE10318",
            "4D36E972-E325-11CE-BFC1",
            "4D36E972E32511CEBFC108002BE10318",
            "4D36E97-2E325-11CE-BFC1-08002BE10318",
            "4D36E972-E325-11CE-BFC1-08002BE1031G",
            "+D36E972-E325-11CE-BFC1-08002BE10318",
        ] {
            assert!(input.parse::<AdapterGuid>().is_err(), "{input}");
        }
    }
}
