//! Cryptographic primitives of the verification core: digest construction,
//! signer recovery and power aggregation.

pub mod digest;
pub mod ecdsa;
pub mod power;

#[rustfmt::skip]
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use digest::{checkpoint_digest, genesis_attestation_digest, withdraw_digest};
pub use ecdsa::recover_signer;
pub use power::{aggregate_power, PowerError, PowerTally};
