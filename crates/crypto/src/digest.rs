//! Domain-separated digests that validators sign.
//!
//! Every digest is `keccak256` over the Ethereum ABI parameter encoding of its
//! inputs, with the bridge id first and a method tag second. The method tag
//! is itself a hash of the method name, so a signature produced for one kind
//! of claim never verifies for another.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use peggy_primitives::{validator::ValidatorSet, BridgeId, Digest, WithdrawalId};

/// Method name hashed into checkpoint digests.
pub const CHECKPOINT_METHOD: &str = "checkpoint";

/// Method name hashed into withdrawal digests.
pub const WITHDRAW_METHOD: &str = "withdraw";

/// Returns the 32-byte tag for a method name.
pub fn method_tag(name: &str) -> B256 {
    keccak256(name.as_bytes())
}

/// Computes the checkpoint committing to `valset` at `nonce`.
pub fn checkpoint_digest(bridge_id: BridgeId, nonce: u64, valset: &ValidatorSet) -> Digest {
    checkpoint_digest_raw(bridge_id, nonce, valset.addresses(), valset.powers())
}

/// Computes a checkpoint over raw parallel lists.
///
/// Encodes `(bytes32 bridgeId, bytes32 tag, uint256 nonce, address[] addresses,
/// uint256[] powers)`. List order is part of the commitment.
pub fn checkpoint_digest_raw(
    bridge_id: BridgeId,
    nonce: u64,
    addresses: &[Address],
    powers: &[U256],
) -> Digest {
    let encoded = (
        bridge_id,
        method_tag(CHECKPOINT_METHOD),
        U256::from(nonce),
        addresses.to_vec(),
        powers.to_vec(),
    )
        .abi_encode_params();
    keccak256(encoded)
}

/// Computes the digest authorizing a withdrawal.
///
/// Encodes `(bytes32 bridgeId, bytes32 tag, bytes32 id, uint256 amount,
/// address destination)`.
pub fn withdraw_digest(
    bridge_id: BridgeId,
    id: WithdrawalId,
    amount: U256,
    destination: Address,
) -> Digest {
    let encoded = (
        bridge_id,
        method_tag(WITHDRAW_METHOD),
        id,
        amount,
        destination,
    )
        .abi_encode_params();
    keccak256(encoded)
}

/// Computes the digest the genesis validators sign when a bridge is
/// deployed: `(bytes32 checkpoint, uint256 powerThreshold)`.
pub fn genesis_attestation_digest(checkpoint: Digest, power_threshold: U256) -> Digest {
    keccak256((checkpoint, power_threshold).abi_encode_params())
}
