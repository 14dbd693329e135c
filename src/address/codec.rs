//! Conversions between native address buffers and address values.
//!
//! # IPv6 compression
//!
//! [`format_ipv6`] follows RFC 5952 section 4:
//! - hex digits are lowercase and leading zeros are suppressed
//! - the longest run of consecutive all-zero words is replaced by `::`
//! - when two runs tie, the leftmost one is compressed
//! - a single zero word is never compressed
//!
//! IPv4-mapped addresses are rendered in plain hex words (`::ffff:c000:280`);
//! no dotted-quad suffix is produced.

use std::net::{Ipv4Addr, Ipv6Addr};

use super::{AddressError, AddressFamily, Ipv6Address};

/// The number of bytes in an IPv4 address.
pub const IPV4_DATA_LENGTH: usize = 4;

/// The number of bytes in an IPv6 address.
pub const IPV6_DATA_LENGTH: usize = 16;

/// The number of 16-bit words in an IPv6 address.
pub const IPV6_WORDS: usize = IPV6_DATA_LENGTH / 2;

/// Shortest run of zero words that may be replaced by `::`.
const MIN_COMPRESSED_RUN: usize = 2;

/// Decodes exactly 4 network-order bytes into an IPv4 address.
///
/// # Errors
///
/// Returns [`AddressError::InvalidLength`] if `data` is not 4 bytes long.
pub fn decode_ipv4(data: &[u8]) -> Result<Ipv4Addr, AddressError> {
    let octets: [u8; IPV4_DATA_LENGTH] = data
        .try_into()
        .map_err(|_| invalid_length(AddressFamily::V4, IPV4_DATA_LENGTH, data.len()))?;
    Ok(Ipv4Addr::from(octets))
}

/// Decodes exactly 16 network-order bytes into an IPv6 address.
///
/// A `scope_id` of `None` or `Some(0)` produces an unscoped address.
///
/// # Errors
///
/// Returns [`AddressError::InvalidLength`] if `data` is not 16 bytes long.
pub fn decode_ipv6(data: &[u8], scope_id: Option<u32>) -> Result<Ipv6Address, AddressError> {
    let octets: [u8; IPV6_DATA_LENGTH] = data
        .try_into()
        .map_err(|_| invalid_length(AddressFamily::V6, IPV6_DATA_LENGTH, data.len()))?;
    let address = Ipv6Address::new(Ipv6Addr::from(octets));
    Ok(match scope_id {
        Some(id) => address.with_scope_id(id),
        None => address,
    })
}

/// Renders an IPv4 address in dotted-decimal notation.
#[must_use]
pub fn format_ipv4(address: Ipv4Addr) -> String {
    address.to_string()
}

/// Renders an IPv6 address in RFC 5952 canonical form, without any scope.
#[must_use]
pub fn format_ipv6(address: &Ipv6Addr) -> String {
    let words = address.segments();

    match longest_zero_run(&words) {
        Some((start, len)) => {
            let head = join_words(&words[..start]);
            let tail = join_words(&words[start + len..]);
            format!("{head}::{tail}")
        }
        None => join_words(&words),
    }
}

/// Finds the leftmost longest run of zero words eligible for compression.
///
/// Returns the start index and length of the run.
fn longest_zero_run(words: &[u16; IPV6_WORDS]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;

    while i < IPV6_WORDS {
        if words[i] != 0 {
            i += 1;
            continue;
        }

        let start = i;
        while i < IPV6_WORDS && words[i] == 0 {
            i += 1;
        }
        let len = i - start;

        // Strictly greater keeps the leftmost run on ties
        if len >= MIN_COMPRESSED_RUN && best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }

    best
}

fn join_words(words: &[u16]) -> String {
    words
        .iter()
        .map(|word| format!("{word:x}"))
        .collect::<Vec<_>>()
        .join(":")
}

const fn invalid_length(family: AddressFamily, expected: usize, actual: usize) -> AddressError {
    AddressError::InvalidLength {
        family,
        expected,
        actual,
    }
}
