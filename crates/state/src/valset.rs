use peggy_crypto::{
    digest::{checkpoint_digest, genesis_attestation_digest},
    power::{aggregate_power, PowerTally},
};
use peggy_primitives::{
    signature::EcdsaSignature, validator::ValidatorSet, BridgeId, Digest, U256,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::StateError;

/// Commitment to the validator set currently in effect.
///
/// Only the checkpoint hash is stored. Callers present the full set on every
/// call and it is accepted only if it hashes back to `last_checkpoint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValsetState {
    /// Mixed into every digest, fixed at initialization.
    bridge_id: BridgeId,
    /// Minimum attested power for any claim, fixed at initialization.
    power_threshold: U256,
    /// Checkpoint of the validator set in effect.
    last_checkpoint: Digest,
    /// Version of the validator set in effect, starts at 0.
    valset_nonce: u64,
}

/// A validated rotation waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValsetCommit {
    checkpoint: Digest,
    nonce: u64,
}

impl ValsetCommit {
    pub fn checkpoint(&self) -> Digest {
        self.checkpoint
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

impl ValsetState {
    /// Creates the state for a fresh bridge with `valset` at nonce 0.
    ///
    /// Fails if `valset` cannot reach `power_threshold` on its own.
    pub fn init(
        bridge_id: BridgeId,
        power_threshold: U256,
        valset: &ValidatorSet,
    ) -> Result<Self, StateError> {
        ensure_reachable(power_threshold, valset)?;

        let last_checkpoint = checkpoint_digest(bridge_id, 0, valset);
        info!(
            %bridge_id,
            %last_checkpoint,
            %power_threshold,
            validators = valset.len(),
            "initialized valset state"
        );

        Ok(Self {
            bridge_id,
            power_threshold,
            last_checkpoint,
            valset_nonce: 0,
        })
    }

    /// Like [`Self::init`], but also requires the genesis validators to have
    /// signed `(checkpoint, power_threshold)` with enough power.
    pub fn init_attested(
        bridge_id: BridgeId,
        power_threshold: U256,
        valset: &ValidatorSet,
        signatures: &[EcdsaSignature],
    ) -> Result<Self, StateError> {
        let state = Self::init(bridge_id, power_threshold, valset)?;

        let digest = genesis_attestation_digest(state.last_checkpoint, power_threshold);
        state.attest(&digest, valset, signatures)?;

        Ok(state)
    }

    pub fn bridge_id(&self) -> BridgeId {
        self.bridge_id
    }

    pub fn power_threshold(&self) -> U256 {
        self.power_threshold
    }

    pub fn last_checkpoint(&self) -> Digest {
        self.last_checkpoint
    }

    pub fn valset_nonce(&self) -> u64 {
        self.valset_nonce
    }

    /// Checks that `current` at `nonce` is the validator set in effect.
    pub fn verify_current(&self, current: &ValidatorSet, nonce: u64) -> Result<(), StateError> {
        if checkpoint_digest(self.bridge_id, nonce, current) != self.last_checkpoint {
            return Err(StateError::StaleOrForgedValidatorSet { nonce });
        }
        Ok(())
    }

    /// Tallies `signatures` over `digest` against `valset` and checks the
    /// result against the power threshold.
    pub fn attest(
        &self,
        digest: &Digest,
        valset: &ValidatorSet,
        signatures: &[EcdsaSignature],
    ) -> Result<PowerTally, StateError> {
        let tally = aggregate_power(digest, valset, signatures)?;
        debug!(
            %digest,
            attested = ?tally.attested(),
            power = %tally.total(),
            threshold = %self.power_threshold,
            "aggregated validator power"
        );
        tally.ensure_threshold(self.power_threshold)?;
        Ok(tally)
    }

    /// Validates a rotation from `current_set` to `new_set` without writing
    /// anything.
    ///
    /// The rotation must be signed by the current set over the checkpoint of
    /// the new set at `new_nonce`, which must directly follow
    /// `current_nonce`.
    pub fn prepare_update(
        &self,
        new_set: &ValidatorSet,
        new_nonce: u64,
        current_set: &ValidatorSet,
        current_nonce: u64,
        signatures: &[EcdsaSignature],
    ) -> Result<ValsetCommit, StateError> {
        self.verify_current(current_set, current_nonce)?;

        let expected = current_nonce
            .checked_add(1)
            .ok_or(StateError::NonceExhausted(current_nonce))?;
        if new_nonce != expected {
            return Err(StateError::NonceMismatch {
                expected,
                got: new_nonce,
            });
        }

        let checkpoint = checkpoint_digest(self.bridge_id, new_nonce, new_set);
        self.attest(&checkpoint, current_set, signatures)?;

        // otherwise no later claim could ever be authorized
        ensure_reachable(self.power_threshold, new_set)?;

        Ok(ValsetCommit {
            checkpoint,
            nonce: new_nonce,
        })
    }

    /// Writes a rotation produced by [`Self::prepare_update`].
    pub fn apply(&mut self, commit: ValsetCommit) {
        info!(
            old_nonce = self.valset_nonce,
            new_nonce = commit.nonce,
            checkpoint = %commit.checkpoint,
            "rotated validator set"
        );
        self.last_checkpoint = commit.checkpoint;
        self.valset_nonce = commit.nonce;
    }
}

fn ensure_reachable(threshold: U256, valset: &ValidatorSet) -> Result<(), StateError> {
    if valset.total_power() < threshold {
        return Err(StateError::ThresholdUnreachable {
            threshold,
            total: valset.total_power(),
        });
    }
    Ok(())
}
