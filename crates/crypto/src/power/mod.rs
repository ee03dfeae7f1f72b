//! Weighted threshold verification over index-aligned signature bundles.
//!
//! Slot `i` of a bundle is only ever checked against validator `i` of the
//! presented set. A signature that recovers to anyone else (or to nobody)
//! contributes nothing, so validators can abstain with a blank signature
//! without invalidating the rest of the bundle.

mod errors;

use alloy_primitives::{Address, U256};
use peggy_primitives::{signature::EcdsaSignature, validator::ValidatorSet, Digest};

pub use errors::PowerError;

use crate::ecdsa::recover_signer;

/// Outcome of aggregating a signature bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PowerTally {
    /// Sum of the power of every slot whose signature matched.
    total: U256,
    /// Indices of the slots that contributed, ascending.
    attested: Vec<usize>,
}

impl PowerTally {
    pub fn total(&self) -> U256 {
        self.total
    }

    /// Indices of the validators whose signatures were counted.
    pub fn attested(&self) -> &[usize] {
        &self.attested
    }

    /// Checks the tally against `threshold`.
    pub fn ensure_threshold(&self, threshold: U256) -> Result<(), PowerError> {
        if self.total < threshold {
            return Err(PowerError::InsufficientPower {
                attested: self.total,
                required: threshold,
            });
        }
        Ok(())
    }
}

/// Returns the power slot `(address, power)` earns with `signature` over
/// `digest`: `power` if the signature recovers to `address`, zero otherwise.
pub fn slot_power(
    digest: &Digest,
    address: &Address,
    power: U256,
    signature: &EcdsaSignature,
) -> U256 {
    let signer = recover_signer(digest, signature);
    if !signer.is_zero() && &signer == address {
        power
    } else {
        U256::ZERO
    }
}

/// Sums the power of every validator in `valset` whose slot in `signatures`
/// carries a valid signature over `digest`.
///
/// # Errors
///
/// Returns `SignatureCountMismatch` if the bundle and the set differ in
/// length. No partial tally is produced in that case.
pub fn aggregate_power(
    digest: &Digest,
    valset: &ValidatorSet,
    signatures: &[EcdsaSignature],
) -> Result<PowerTally, PowerError> {
    if signatures.len() != valset.len() {
        return Err(PowerError::SignatureCountMismatch {
            signatures: signatures.len(),
            validators: valset.len(),
        });
    }

    let mut tally = PowerTally::default();
    for (index, ((address, power), signature)) in valset.iter().zip(signatures).enumerate() {
        // zero-power slots never count as attesting
        let earned = slot_power(digest, address, *power, signature);
        if earned.is_zero() {
            continue;
        }
        // bounded by the set's total power, which is overflow-checked
        tally.total = tally.total.saturating_add(earned);
        tally.attested.push(index);
    }

    Ok(tally)
}
