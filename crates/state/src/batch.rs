use peggy_crypto::{digest::withdraw_digest, power::PowerTally};
use peggy_primitives::{
    signature::EcdsaSignature, validator::ValidatorSet, withdrawal::WithdrawalClaim,
    WithdrawalId,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::StateError,
    replay::ReplayGuard,
    valset::{ValsetCommit, ValsetState},
};

/// The complete mutable state of a bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeState {
    valset: ValsetState,
    processed: ReplayGuard,
}

/// Writes collected while validating a call, applied all at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateBatch {
    valset: Option<ValsetCommit>,
    processed: Vec<WithdrawalId>,
}

impl StateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_valset(mut self, commit: ValsetCommit) -> Self {
        self.valset = Some(commit);
        self
    }

    pub fn with_processed(mut self, id: WithdrawalId) -> Self {
        self.processed.push(id);
        self
    }

    pub fn valset(&self) -> Option<&ValsetCommit> {
        self.valset.as_ref()
    }

    pub fn processed(&self) -> &[WithdrawalId] {
        &self.processed
    }

    pub fn is_empty(&self) -> bool {
        self.valset.is_none() && self.processed.is_empty()
    }
}

impl BridgeState {
    pub fn new(valset: ValsetState) -> Self {
        Self {
            valset,
            processed: ReplayGuard::new(),
        }
    }

    pub fn from_parts(valset: ValsetState, processed: ReplayGuard) -> Self {
        Self { valset, processed }
    }

    pub fn valset(&self) -> &ValsetState {
        &self.valset
    }

    pub fn processed(&self) -> &ReplayGuard {
        &self.processed
    }

    pub fn is_processed(&self, id: &WithdrawalId) -> bool {
        self.processed.contains(id)
    }

    /// Validates a withdrawal claim against the current validator set.
    ///
    /// Checks run in order: the presented set must be the one in effect, the
    /// id must be unused, and the signatures must carry enough power over the
    /// withdrawal digest. On success the returned batch marks the id.
    pub fn prepare_withdrawal(
        &self,
        claim: &WithdrawalClaim,
        current_set: &ValidatorSet,
        current_nonce: u64,
        signatures: &[EcdsaSignature],
    ) -> Result<(StateBatch, PowerTally), StateError> {
        self.valset.verify_current(current_set, current_nonce)?;

        if self.processed.contains(&claim.id) {
            return Err(StateError::DuplicateWithdrawal(claim.id));
        }

        let digest = withdraw_digest(
            self.valset.bridge_id(),
            claim.id,
            claim.amount,
            claim.destination,
        );
        let tally = self.valset.attest(&digest, current_set, signatures)?;

        Ok((StateBatch::new().with_processed(claim.id), tally))
    }

    /// Validates a validator set rotation. See [`ValsetState::prepare_update`].
    pub fn prepare_valset_update(
        &self,
        new_set: &ValidatorSet,
        new_nonce: u64,
        current_set: &ValidatorSet,
        current_nonce: u64,
        signatures: &[EcdsaSignature],
    ) -> Result<StateBatch, StateError> {
        let commit = self.valset.prepare_update(
            new_set,
            new_nonce,
            current_set,
            current_nonce,
            signatures,
        )?;
        Ok(StateBatch::new().with_valset(commit))
    }

    /// Applies every write in `batch`.
    pub fn apply_batch(&mut self, batch: StateBatch) {
        let StateBatch { valset, processed } = batch;

        if let Some(commit) = valset {
            self.valset.apply(commit);
        }

        for id in processed {
            if !self.processed.mark_if_new(id) {
                // only reachable if a stale batch is applied twice
                debug!(%id, "withdrawal id already marked");
            }
        }
    }
}
