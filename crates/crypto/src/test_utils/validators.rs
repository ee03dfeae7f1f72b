use alloy_primitives::{Address, U256};
use peggy_primitives::{
    signature::{EcdsaSignature, SignatureBundle},
    validator::ValidatorSet,
    Digest,
};
use secp256k1::{PublicKey, SecretKey};

use super::{make_secret_key, sign_digest};
use crate::ecdsa::address_from_pubkey;

/// First seed handed out by [`TestValidators::with_powers`].
const BASE_SEED: u64 = 0x5eed;

#[derive(Debug, Clone)]
pub struct TestValidator {
    secret_key: SecretKey,
    address: Address,
    power: U256,
}

impl TestValidator {
    pub fn from_seed(seed: u64, power: u64) -> Self {
        let secret_key = make_secret_key(seed);
        let address = address_from_pubkey(&PublicKey::from_secret_key_global(&secret_key));
        Self {
            secret_key,
            address,
            power: U256::from(power),
        }
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn power(&self) -> U256 {
        self.power
    }

    pub fn sign(&self, digest: &Digest) -> EcdsaSignature {
        sign_digest(&self.secret_key, digest)
    }
}

/// An ordered group of validators with known keys.
#[derive(Debug, Clone)]
pub struct TestValidators {
    validators: Vec<TestValidator>,
}

impl TestValidators {
    /// `n` validators of equal `power`.
    pub fn generate(n: usize, power: u64) -> Self {
        Self::with_powers(&vec![power; n])
    }

    /// One validator per entry of `powers`, in order.
    pub fn with_powers(powers: &[u64]) -> Self {
        Self::with_seed_offset(BASE_SEED, powers)
    }

    /// Like [`Self::with_powers`], but with keys disjoint from any other
    /// group built with a different `offset`.
    pub fn with_seed_offset(offset: u64, powers: &[u64]) -> Self {
        let validators = powers
            .iter()
            .enumerate()
            .map(|(i, power)| {
                let seed = offset.wrapping_mul(1_000).wrapping_add(i as u64);
                TestValidator::from_seed(seed, *power)
            })
            .collect();
        Self { validators }
    }

    pub fn get(&self, index: usize) -> &TestValidator {
        &self.validators[index]
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.validators.iter().map(|v| v.address).collect()
    }

    pub fn powers(&self) -> Vec<U256> {
        self.validators.iter().map(|v| v.power).collect()
    }

    pub fn validator_set(&self) -> ValidatorSet {
        ValidatorSet::try_new(self.addresses(), self.powers())
            .expect("test validators form a valid set")
    }

    /// Every validator signs.
    pub fn sign_all(&self, digest: &Digest) -> SignatureBundle {
        self.validators.iter().map(|v| v.sign(digest)).collect()
    }

    /// Only the validators at `signers` sign, the others leave a blank slot.
    pub fn sign_subset(&self, digest: &Digest, signers: &[usize]) -> SignatureBundle {
        self.validators
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if signers.contains(&i) {
                    v.sign(digest)
                } else {
                    EcdsaSignature::blank()
                }
            })
            .collect()
    }
}
