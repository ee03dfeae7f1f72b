//! Subcommands printing the digests validators sign.

use std::path::Path;

use anyhow::Context;
use peggy_crypto::{
    digest::{checkpoint_digest, genesis_attestation_digest, withdraw_digest},
    ecdsa::signing_hash,
};
use peggy_params::BridgeParams;
use peggy_primitives::{keccak256, Digest, B256};

use crate::args::{SubcCheckpoint, SubcGenesisDigest, SubcWithdrawDigest};

fn load_params(path: &Path) -> anyhow::Result<BridgeParams> {
    BridgeParams::load_from_path(path)
        .with_context(|| format!("failed to load params from {}", path.display()))
}

fn print_digest(digest: Digest) {
    println!("digest: {digest}");
    println!("signing hash: {}", signing_hash(&digest));
}

/// Prints the checkpoint of the params' validator set at the given nonce.
pub(crate) fn exec_checkpoint(cmd: SubcCheckpoint) -> anyhow::Result<()> {
    let params = load_params(&cmd.params)?;
    let valset = params.validator_set()?;
    let digest = checkpoint_digest(params.bridge_id, cmd.nonce.unwrap_or(0), &valset);
    print_digest(digest);
    Ok(())
}

/// Prints the attestation genesis validators sign when the bridge is
/// deployed.
pub(crate) fn exec_genesis_digest(cmd: SubcGenesisDigest) -> anyhow::Result<()> {
    let params = load_params(&cmd.params)?;
    let digest = genesis_attestation_digest(params.genesis_checkpoint()?, params.power_threshold);
    print_digest(digest);
    Ok(())
}

/// Prints the digest of a withdrawal claim.
pub(crate) fn exec_withdraw_digest(cmd: SubcWithdrawDigest) -> anyhow::Result<()> {
    let params = load_params(&cmd.params)?;
    let id = resolve_withdrawal_id(cmd.id, cmd.id_label.as_deref())?;
    println!("id: {id}");
    print_digest(withdraw_digest(params.bridge_id, id, cmd.amount, cmd.destination));
    Ok(())
}

/// Picks the withdrawal id from exactly one of `--id` or `--id-label`.
fn resolve_withdrawal_id(id: Option<B256>, label: Option<&str>) -> anyhow::Result<B256> {
    match (id, label) {
        (Some(id), None) => Ok(id),
        (None, Some(label)) => Ok(keccak256(label.as_bytes())),
        (Some(_), Some(_)) => anyhow::bail!("--id and --id-label are mutually exclusive"),
        (None, None) => anyhow::bail!("one of --id or --id-label is required"),
    }
}
