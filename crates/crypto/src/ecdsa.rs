//! Signer recovery for Ethereum-style recoverable ECDSA signatures.

use alloy_primitives::{eip191_hash_message, keccak256, Address, B256};
use peggy_primitives::{signature::EcdsaSignature, Digest};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, PublicKey, SECP256K1,
};

/// Offset between Ethereum's legacy `v` and the raw recovery id.
pub(crate) const LEGACY_V_OFFSET: u8 = 27;

/// Returns the hash that is actually fed to ECDSA for `digest`.
///
/// Validators sign digests as Ethereum personal messages, i.e.
/// `keccak256("\x19Ethereum Signed Message:\n32" || digest)`.
pub fn signing_hash(digest: &Digest) -> B256 {
    eip191_hash_message(digest)
}

/// Recovers the address that produced `signature` over `digest`.
///
/// Never fails: a malformed signature (unknown `v`, out of range scalars, no
/// recoverable point) yields [`Address::ZERO`], which cannot be a validator.
pub fn recover_signer(digest: &Digest, signature: &EcdsaSignature) -> Address {
    try_recover(digest, signature).unwrap_or(Address::ZERO)
}

fn try_recover(digest: &Digest, signature: &EcdsaSignature) -> Option<Address> {
    let recid = match signature.v {
        27 | 28 => signature.v - LEGACY_V_OFFSET,
        _ => return None,
    };

    let recovery_id = RecoveryId::from_i32(recid as i32).ok()?;
    let recoverable = RecoverableSignature::from_compact(&signature.compact(), recovery_id).ok()?;
    let message = Message::from_digest(signing_hash(digest).0);

    let pubkey = SECP256K1.recover_ecdsa(&message, &recoverable).ok()?;
    Some(address_from_pubkey(&pubkey))
}

/// Derives the Ethereum address of a public key.
pub fn address_from_pubkey(pubkey: &PublicKey) -> Address {
    let uncompressed = pubkey.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    Address::from_slice(&hash[12..])
}
