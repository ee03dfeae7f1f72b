use peggy_crypto::PowerError;
use peggy_primitives::{WithdrawalId, U256};
use thiserror::Error;

/// Reasons a state transition is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// A validator set could never reach the power threshold.
    #[error("total validator power {total} is below the power threshold {threshold}")]
    ThresholdUnreachable { threshold: U256, total: U256 },

    /// The presented validator set does not hash to the stored checkpoint.
    #[error("validator set at nonce {nonce} does not match the stored checkpoint")]
    StaleOrForgedValidatorSet { nonce: u64 },

    /// The new validator set nonce is not the successor of the current one.
    #[error("invalid valset nonce: expected {expected}, got {got}")]
    NonceMismatch { expected: u64, got: u64 },

    /// No successor nonce exists.
    #[error("valset nonce {0} cannot be advanced")]
    NonceExhausted(u64),

    /// The withdrawal id has already been honored.
    #[error("withdrawal {0} was already processed")]
    DuplicateWithdrawal(WithdrawalId),

    #[error(transparent)]
    Power(#[from] PowerError),
}
