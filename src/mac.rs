//! Hardware (link-layer) addresses.
//!
//! A [`MacAddress`] holds 6 to 8 bytes. EUI-48 is the common case; EUI-64 and
//! the odd 7-byte link types reported by some drivers fit in the same value.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Minimum number of bytes in a hardware address.
pub const MIN_MAC_LENGTH: usize = 6;

/// Maximum number of bytes in a hardware address.
pub const MAX_MAC_LENGTH: usize = 8;

/// Error type for hardware address construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacAddressError {
    /// The text is not 6-8 groups of two hex digits with a uniform separator.
    #[error("Invalid MAC address '{input}'")]
    InvalidFormat {
        /// The rejected input.
        input: String,
    },

    /// The byte sequence is outside the supported length range.
    #[error("MAC address data must be 6-8 bytes in length, not {actual} bytes")]
    InvalidLength {
        /// The rejected length.
        actual: usize,
    },
}

/// A hardware address of 6 to 8 bytes.
///
/// Equality compares bytes, so `A4:83:E7:2E:A1:67` and `a4-83-e7-2e-a1-67`
/// parse to equal values.
///
/// # Examples
///
/// ```
/// use ifbrowse::MacAddress;
///
/// let mac: MacAddress = "A4-83-E7-2E-A1-67".parse().unwrap();
/// assert_eq!(mac.as_bytes(), &[0xa4, 0x83, 0xe7, 0x2e, 0xa1, 0x67]);
/// assert_eq!(mac.to_string(), "a4:83:e7:2e:a1:67");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress {
    data: [u8; MAX_MAC_LENGTH],
    len: u8,
}

impl MacAddress {
    /// Creates an address from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MacAddressError::InvalidLength`] unless `bytes` holds 6 to 8 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MacAddressError> {
        if !(MIN_MAC_LENGTH..=MAX_MAC_LENGTH).contains(&bytes.len()) {
            return Err(MacAddressError::InvalidLength {
                actual: bytes.len(),
            });
        }

        let mut data = [0u8; MAX_MAC_LENGTH];
        data[..bytes.len()].copy_from_slice(bytes);
        #[allow(clippy::cast_possible_truncation)] // bounded by MAX_MAC_LENGTH
        let len = bytes.len() as u8;
        Ok(Self { data, len })
    }

    /// Creates a 6-byte (EUI-48) address.
    #[must_use]
    pub const fn from_eui48(bytes: [u8; 6]) -> Self {
        let [a, b, c, d, e, f] = bytes;
        Self {
            data: [a, b, c, d, e, f, 0, 0],
            len: 6,
        }
    }

    /// Parses colon- or hyphen-separated hex text.
    ///
    /// # Errors
    ///
    /// Returns [`MacAddressError::InvalidFormat`] if the text is not 6 to 8
    /// groups of exactly two hex digits joined by a single separator kind.
    pub fn parse(text: &str) -> Result<Self, MacAddressError> {
        let invalid = || MacAddressError::InvalidFormat {
            input: text.to_string(),
        };

        let separator = if text.contains(':') { ':' } else { '-' };
        let mut data = [0u8; MAX_MAC_LENGTH];
        let mut len = 0;

        for group in text.split(separator) {
            if len == MAX_MAC_LENGTH || group.len() != 2 {
                return Err(invalid());
            }
            // from_str_radix tolerates a leading '+', so check digits first
            if !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            data[len] = u8::from_str_radix(group, 16).map_err(|_| invalid())?;
            len += 1;
        }

        if len < MIN_MAC_LENGTH {
            return Err(invalid());
        }

        Self::from_bytes(&data[..len]).map_err(|_| invalid())
    }

    /// Returns the address bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..usize::from(self.len)]
    }

    /// Returns the number of bytes in the address.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; an address holds at least 6 bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl FromStr for MacAddress {
    type Err = MacAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&[u8]> for MacAddress {
    type Error = MacAddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
