//! Deterministic validator keys and signing helpers for tests.

mod validators;

use alloy_primitives::{keccak256, B256};
use peggy_primitives::{signature::EcdsaSignature, Digest, WithdrawalId};
use secp256k1::{Message, SecretKey, SECP256K1};

pub use validators::{TestValidator, TestValidators};

use crate::ecdsa::{signing_hash, LEGACY_V_OFFSET};

/// Derives a secret key from `seed`.
///
/// The same seed always yields the same key, so tests never need an RNG.
pub fn make_secret_key(seed: u64) -> SecretKey {
    let mut material = keccak256(seed.to_be_bytes());
    loop {
        if let Ok(sk) = SecretKey::from_slice(material.as_slice()) {
            return sk;
        }
        material = keccak256(material);
    }
}

/// Signs `digest` the way a validator does: as an Ethereum personal message,
/// with `v` in legacy form.
pub fn sign_digest(sk: &SecretKey, digest: &Digest) -> EcdsaSignature {
    let message = Message::from_digest(signing_hash(digest).0);
    let (recid, compact) = SECP256K1
        .sign_ecdsa_recoverable(&message, sk)
        .serialize_compact();

    EcdsaSignature::new(
        recid.to_i32() as u8 + LEGACY_V_OFFSET,
        B256::from_slice(&compact[..32]),
        B256::from_slice(&compact[32..]),
    )
}

/// A signature that recovers to no validator.
pub fn garbage_signature(seed: u64) -> EcdsaSignature {
    let r = keccak256([seed.to_be_bytes().as_slice(), b"r"].concat());
    let s = keccak256([seed.to_be_bytes().as_slice(), b"s"].concat());
    EcdsaSignature::new(0, r, s)
}

/// Withdrawal id derived from a human-readable label.
pub fn withdrawal_id(label: &str) -> WithdrawalId {
    keccak256(label.as_bytes())
}
