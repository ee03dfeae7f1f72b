//! Recoverable ECDSA signatures in Ethereum `(v, r, s)` form.

use std::ops::Deref;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::errors::SignatureError;

/// A single recoverable secp256k1 signature.
///
/// `v` carries the recovery id in Ethereum's legacy encoding (27 or 28). No
/// validation happens here: a malformed signature is still a signature, it
/// simply never recovers to a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EcdsaSignature {
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl EcdsaSignature {
    pub fn new(v: u8, r: B256, s: B256) -> Self {
        Self { v, r, s }
    }

    /// Get the compact signature (r || s) without recovery ID.
    pub fn compact(&self) -> [u8; 64] {
        let mut compact = [0u8; 64];
        compact[0..32].copy_from_slice(self.r.as_slice());
        compact[32..64].copy_from_slice(self.s.as_slice());
        compact
    }

    /// An all-zero placeholder, used by validators that abstain.
    pub fn blank() -> Self {
        Self {
            v: 0,
            r: B256::ZERO,
            s: B256::ZERO,
        }
    }
}

/// Signatures index-aligned to the validator set they are checked against.
///
/// Slot `i` is only ever compared with validator `i`. A blank or garbage
/// signature at a slot means that validator did not attest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureBundle(Vec<EcdsaSignature>);

impl SignatureBundle {
    pub fn new(signatures: Vec<EcdsaSignature>) -> Self {
        Self(signatures)
    }

    /// Assembles a bundle from three parallel `v`, `r`, `s` lists, the shape in
    /// which relayers submit them.
    pub fn from_parts(v: &[u8], r: &[B256], s: &[B256]) -> Result<Self, SignatureError> {
        if v.len() != r.len() || v.len() != s.len() {
            return Err(SignatureError::LengthMismatch {
                v: v.len(),
                r: r.len(),
                s: s.len(),
            });
        }

        Ok(Self(
            v.iter()
                .zip(r.iter().zip(s.iter()))
                .map(|(v, (r, s))| EcdsaSignature::new(*v, *r, *s))
                .collect(),
        ))
    }

    /// Consume and return the inner signatures.
    pub fn into_inner(self) -> Vec<EcdsaSignature> {
        self.0
    }
}

impl Deref for SignatureBundle {
    type Target = [EcdsaSignature];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<EcdsaSignature>> for SignatureBundle {
    fn from(signatures: Vec<EcdsaSignature>) -> Self {
        Self(signatures)
    }
}

impl FromIterator<EcdsaSignature> for SignatureBundle {
    fn from_iter<I: IntoIterator<Item = EcdsaSignature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
