//! Error types for address decoding.

use thiserror::Error;

use super::AddressFamily;

/// Error type for decoding raw address buffers and address strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The byte buffer has the wrong size for the address family.
    #[error("{family} address data must be {expected} bytes in length, not {actual} bytes")]
    InvalidLength {
        /// Family the buffer was decoded as
        family: AddressFamily,
        /// Required length in bytes
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// The textual address could not be parsed.
    #[error("Invalid {family} address '{input}'")]
    InvalidFormat {
        /// Family the text was parsed as
        family: AddressFamily,
        /// The rejected input
        input: String,
    },
}
