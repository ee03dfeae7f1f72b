//! Call arguments in the shape relayers submit them: parallel lists that have
//! not been checked yet.

use peggy_primitives::{
    errors::{SignatureError, ValsetError},
    signature::SignatureBundle,
    validator::ValidatorSet,
    Address, B256, U256,
};

/// A validator set as two parallel `addresses` / `powers` lists.
#[derive(Debug, Clone, Copy)]
pub struct RawValset<'a> {
    pub addresses: &'a [Address],
    pub powers: &'a [U256],
}

impl<'a> RawValset<'a> {
    pub fn new(addresses: &'a [Address], powers: &'a [U256]) -> Self {
        Self { addresses, powers }
    }

    pub fn to_valset(&self) -> Result<ValidatorSet, ValsetError> {
        ValidatorSet::try_new(self.addresses.to_vec(), self.powers.to_vec())
    }
}

/// Signatures as three parallel `v` / `r` / `s` lists.
#[derive(Debug, Clone, Copy)]
pub struct RawSignatures<'a> {
    pub v: &'a [u8],
    pub r: &'a [B256],
    pub s: &'a [B256],
}

impl<'a> RawSignatures<'a> {
    pub fn new(v: &'a [u8], r: &'a [B256], s: &'a [B256]) -> Self {
        Self { v, r, s }
    }

    pub fn to_bundle(&self) -> Result<SignatureBundle, SignatureError> {
        SignatureBundle::from_parts(self.v, self.r, self.s)
    }
}
