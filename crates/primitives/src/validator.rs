//! Index-aligned validator sets.

use std::collections::HashSet;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::errors::ValsetError;

/// A validator set as presented at call time: two parallel lists where
/// `powers[i]` is the voting weight of `addresses[i]`.
///
/// Position is part of the identity of a slot. Two sets with the same members
/// in a different order are different sets and commit to different
/// checkpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawValidatorSet", into = "RawValidatorSet")]
pub struct ValidatorSet {
    addresses: Vec<Address>,
    powers: Vec<U256>,
    /// Cached sum of `powers`, checked for overflow at construction.
    total_power: U256,
}

#[derive(Serialize, Deserialize)]
struct RawValidatorSet {
    addresses: Vec<Address>,
    powers: Vec<U256>,
}

impl ValidatorSet {
    /// Builds a validator set from parallel address and power lists.
    ///
    /// # Errors
    ///
    /// - `LengthMismatch` if the lists differ in length
    /// - `Empty` if no validators are given
    /// - `ZeroAddress` if any address is zero
    /// - `DuplicateAddress` if an address is listed twice
    /// - `PowerOverflow` if the total power does not fit in a `U256`
    pub fn try_new(addresses: Vec<Address>, powers: Vec<U256>) -> Result<Self, ValsetError> {
        if addresses.len() != powers.len() {
            return Err(ValsetError::LengthMismatch {
                addresses: addresses.len(),
                powers: powers.len(),
            });
        }

        if addresses.is_empty() {
            return Err(ValsetError::Empty);
        }

        let mut seen = HashSet::with_capacity(addresses.len());
        for (index, address) in addresses.iter().enumerate() {
            if address.is_zero() {
                return Err(ValsetError::ZeroAddress(index));
            }
            if !seen.insert(*address) {
                return Err(ValsetError::DuplicateAddress {
                    address: *address,
                    index,
                });
            }
        }

        let total_power = powers
            .iter()
            .try_fold(U256::ZERO, |acc, p| acc.checked_add(*p))
            .ok_or(ValsetError::PowerOverflow)?;

        Ok(Self {
            addresses,
            powers,
            total_power,
        })
    }

    /// Builds a validator set from `(address, power)` pairs.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (Address, U256)>,
    ) -> Result<Self, ValsetError> {
        let (addresses, powers) = pairs.into_iter().unzip();
        Self::try_new(addresses, powers)
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn powers(&self) -> &[U256] {
        &self.powers
    }

    pub fn total_power(&self) -> U256 {
        self.total_power
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Always false, construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Iterates over `(address, power)` slots in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &U256)> + '_ {
        self.addresses.iter().zip(self.powers.iter())
    }

    /// Consume and return the parallel lists.
    pub fn into_parts(self) -> (Vec<Address>, Vec<U256>) {
        (self.addresses, self.powers)
    }
}

impl TryFrom<RawValidatorSet> for ValidatorSet {
    type Error = ValsetError;

    fn try_from(raw: RawValidatorSet) -> Result<Self, Self::Error> {
        Self::try_new(raw.addresses, raw.powers)
    }
}

impl From<ValidatorSet> for RawValidatorSet {
    fn from(set: ValidatorSet) -> Self {
        let (addresses, powers) = set.into_parts();
        Self { addresses, powers }
    }
}
