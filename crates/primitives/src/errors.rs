//! Errors raised while constructing primitive values from untrusted input.

use alloy_primitives::Address;
use thiserror::Error;

/// Reasons a pair of address/power lists cannot form a validator set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValsetError {
    /// No validators were supplied.
    #[error("validator set is empty")]
    Empty,

    /// The address and power lists are not index-aligned.
    #[error("validator addresses ({addresses}) and powers ({powers}) differ in length")]
    LengthMismatch { addresses: usize, powers: usize },

    /// The zero address is reserved for unrecoverable signatures.
    #[error("zero address at validator index {0}")]
    ZeroAddress(usize),

    /// The same address appears more than once.
    #[error("duplicate validator {address} at index {index}")]
    DuplicateAddress { address: Address, index: usize },

    /// The sum of all powers does not fit in 256 bits.
    #[error("total validator power overflows")]
    PowerOverflow,
}

/// Errors for signature bundles assembled from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The `v`, `r` and `s` lists are not index-aligned.
    #[error("signature parts differ in length: v {v}, r {r}, s {s}")]
    LengthMismatch { v: usize, r: usize, s: usize },
}
