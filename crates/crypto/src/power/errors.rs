//! Error types for power aggregation.

use alloy_primitives::U256;
use thiserror::Error;

/// Errors that can occur while tallying validator power.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowerError {
    /// The signature bundle is not index-aligned with the validator set.
    #[error("signature count {signatures} does not match validator count {validators}")]
    SignatureCountMismatch { signatures: usize, validators: usize },

    /// The attested power is below the threshold.
    #[error("insufficient power: attested {attested}, required {required}")]
    InsufficientPower { attested: U256, required: U256 },
}
