use peggy_crypto::PowerError;
use peggy_ledger_types::LedgerError;
use peggy_params::ParamsError;
use peggy_primitives::{
    errors::{SignatureError, ValsetError},
    WithdrawalId, U256,
};
use peggy_state::StateError;
use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Every way a bridge call can be refused. A refused call never changes
/// bridge state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("validator set does not match the stored checkpoint")]
    StaleOrForgedValidatorSet,

    #[error("insufficient power: attested {attested}, required {required}")]
    InsufficientPower { attested: U256, required: U256 },

    #[error("invalid valset nonce: expected {expected}, got {got}")]
    NonceMismatch { expected: u64, got: u64 },

    #[error("withdrawal {0} was already processed")]
    DuplicateWithdrawal(WithdrawalId),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),
}

impl From<StateError> for BridgeError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::ThresholdUnreachable { .. } => Self::InvalidConfiguration(err.to_string()),
            StateError::StaleOrForgedValidatorSet { .. } => Self::StaleOrForgedValidatorSet,
            StateError::NonceMismatch { expected, got } => Self::NonceMismatch { expected, got },
            StateError::NonceExhausted(_) => Self::MalformedInput(err.to_string()),
            StateError::DuplicateWithdrawal(id) => Self::DuplicateWithdrawal(id),
            StateError::Power(power) => power.into(),
        }
    }
}

impl From<PowerError> for BridgeError {
    fn from(err: PowerError) -> Self {
        match err {
            PowerError::InsufficientPower { attested, required } => {
                Self::InsufficientPower { attested, required }
            }
            PowerError::SignatureCountMismatch { .. } => Self::MalformedInput(err.to_string()),
        }
    }
}

impl From<ValsetError> for BridgeError {
    fn from(err: ValsetError) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl From<SignatureError> for BridgeError {
    fn from(err: SignatureError) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl From<ParamsError> for BridgeError {
    fn from(err: ParamsError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}
