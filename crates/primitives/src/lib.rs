//! Collection of value types shared by the Peggy verification core.
//!
//! Everything that crosses the bridge boundary is expressed in Ethereum ABI
//! terms, so the scalar types are re-exported straight from `alloy-primitives`.

pub mod errors;
pub mod signature;
pub mod validator;
pub mod withdrawal;

pub use alloy_primitives::{keccak256, Address, B256, U256};

/// Opaque per-deployment identifier mixed into every digest.
pub type BridgeId = B256;

/// 32-byte hash that validators sign.
pub type Digest = B256;

/// Voting weight of a validator. Thresholds are sums of these.
pub type Power = U256;

/// Unique identifier of a withdrawal claim.
pub type WithdrawalId = B256;

pub mod prelude {
    pub use super::{
        errors::{SignatureError, ValsetError},
        signature::{EcdsaSignature, SignatureBundle},
        validator::ValidatorSet,
        withdrawal::WithdrawalClaim,
        Address, BridgeId, Digest, Power, WithdrawalId, B256, U256,
    };
}
