use std::mem;

use peggy_ledger_types::Ledger;
use peggy_params::BridgeParams;
use peggy_primitives::{
    signature::{EcdsaSignature, SignatureBundle},
    validator::ValidatorSet,
    withdrawal::WithdrawalClaim,
    Address, BridgeId, Digest, WithdrawalId, B256, U256,
};
use peggy_state::{BridgeState, ValsetState};
use tracing::{info, warn};

use crate::{
    errors::{BridgeError, BridgeResult},
    events::BridgeEvent,
    relay::{RawSignatures, RawValset},
};

/// The bridge verification core.
///
/// Owns the persisted [`BridgeState`] and the [`Ledger`] it moves funds
/// through. Every call either commits all of its effects or none: checks
/// run first against an immutable view, then the ledger is asked to move
/// funds, and only then is the state written.
#[derive(Debug)]
pub struct BridgeCore<L> {
    state: BridgeState,
    ledger: L,
    events: Vec<BridgeEvent>,
}

impl<L: Ledger> BridgeCore<L> {
    /// Creates a bridge from deployment parameters.
    pub fn new(params: &BridgeParams, ledger: L) -> BridgeResult<Self> {
        params.validate()?;
        let valset = ValsetState::init(
            params.bridge_id,
            params.power_threshold,
            &params.validator_set()?,
        )?;
        Ok(Self::from_state(BridgeState::new(valset), ledger))
    }

    /// Creates a bridge whose genesis validators have signed off on the
    /// initial checkpoint and threshold.
    pub fn new_attested(
        params: &BridgeParams,
        signatures: &[EcdsaSignature],
        ledger: L,
    ) -> BridgeResult<Self> {
        params.validate()?;
        let valset = ValsetState::init_attested(
            params.bridge_id,
            params.power_threshold,
            &params.validator_set()?,
            signatures,
        )?;
        Ok(Self::from_state(BridgeState::new(valset), ledger))
    }

    /// Resumes a bridge from a previously persisted state.
    pub fn from_state(state: BridgeState, ledger: L) -> Self {
        Self {
            state,
            ledger,
            events: Vec::new(),
        }
    }

    /// Locks `amount` of `token` from `from`, to be minted to `destination`
    /// on the other chain.
    pub fn deposit(
        &mut self,
        from: Address,
        token: Address,
        destination: B256,
        amount: U256,
    ) -> BridgeResult<()> {
        self.ledger.lock(token, amount, from).inspect_err(|err| {
            warn!(%from, %token, %amount, %err, "deposit rejected by ledger");
        })?;

        info!(%from, %token, %destination, %amount, "deposit locked");
        self.events.push(BridgeEvent::Deposit {
            token,
            destination,
            amount,
        });
        Ok(())
    }

    /// Releases funds for a withdrawal claim signed by the current validator
    /// set.
    ///
    /// The claim id is consumed only if every check and the ledger transfer
    /// succeed, so a failed attempt can be retried.
    pub fn withdraw(
        &mut self,
        claim: &WithdrawalClaim,
        current_set: &ValidatorSet,
        current_nonce: u64,
        signatures: &[EcdsaSignature],
    ) -> BridgeResult<()> {
        let (batch, tally) = self
            .state
            .prepare_withdrawal(claim, current_set, current_nonce, signatures)
            .inspect_err(|err| warn!(id = %claim.id, %err, "withdrawal rejected"))?;

        self.ledger
            .unlock(claim.token, claim.destination, claim.amount)
            .inspect_err(|err| warn!(id = %claim.id, %err, "withdrawal rejected by ledger"))?;

        self.state.apply_batch(batch);

        info!(
            id = %claim.id,
            token = %claim.token,
            destination = %claim.destination,
            amount = %claim.amount,
            power = %tally.total(),
            "withdrawal released"
        );
        self.events.push(BridgeEvent::Withdraw {
            token: claim.token,
            destination: claim.destination,
            amount: claim.amount,
        });
        Ok(())
    }

    /// Rotates to `new_set` at `new_nonce`, authorized by signatures of the
    /// current set over the new checkpoint.
    pub fn update_valset(
        &mut self,
        new_set: &ValidatorSet,
        new_nonce: u64,
        current_set: &ValidatorSet,
        current_nonce: u64,
        signatures: &[EcdsaSignature],
    ) -> BridgeResult<()> {
        let batch = self
            .state
            .prepare_valset_update(new_set, new_nonce, current_set, current_nonce, signatures)
            .inspect_err(|err| {
                warn!(new_nonce, current_nonce, %err, "valset update rejected");
            })?;

        self.state.apply_batch(batch);

        self.events.push(BridgeEvent::ValsetUpdated {
            addresses: new_set.addresses().to_vec(),
            powers: new_set.powers().to_vec(),
            nonce: new_nonce,
        });
        Ok(())
    }

    /// [`Self::withdraw`] with the current set and signatures given as the
    /// parallel lists a relayer submits.
    ///
    /// Lists that do not line up and empty validator sets fail with
    /// `MalformedInput` before any other check.
    pub fn withdraw_raw(
        &mut self,
        claim: &WithdrawalClaim,
        current: RawValset<'_>,
        current_nonce: u64,
        signatures: RawSignatures<'_>,
    ) -> BridgeResult<()> {
        let (current_set, signatures) = decode_call(current, signatures)
            .inspect_err(|err| warn!(id = %claim.id, %err, "malformed withdrawal"))?;
        self.withdraw(claim, &current_set, current_nonce, &signatures)
    }

    /// [`Self::update_valset`] with both sets and the signatures given as
    /// the parallel lists a relayer submits.
    pub fn update_valset_raw(
        &mut self,
        new: RawValset<'_>,
        new_nonce: u64,
        current: RawValset<'_>,
        current_nonce: u64,
        signatures: RawSignatures<'_>,
    ) -> BridgeResult<()> {
        let new_set = new
            .to_valset()
            .map_err(BridgeError::from)
            .inspect_err(|err| warn!(new_nonce, %err, "malformed new valset"))?;
        let (current_set, signatures) = decode_call(current, signatures)
            .inspect_err(|err| warn!(new_nonce, %err, "malformed valset update"))?;
        self.update_valset(
            &new_set,
            new_nonce,
            &current_set,
            current_nonce,
            &signatures,
        )
    }

    pub fn last_checkpoint(&self) -> Digest {
        self.state.valset().last_checkpoint()
    }

    pub fn valset_nonce(&self) -> u64 {
        self.state.valset().valset_nonce()
    }

    pub fn power_threshold(&self) -> U256 {
        self.state.valset().power_threshold()
    }

    pub fn bridge_id(&self) -> BridgeId {
        self.state.valset().bridge_id()
    }

    pub fn is_processed(&self, id: &WithdrawalId) -> bool {
        self.state.is_processed(id)
    }

    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Drains the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<BridgeEvent> {
        mem::take(&mut self.events)
    }

    /// Consumes the core, returning its state and ledger.
    pub fn into_parts(self) -> (BridgeState, L) {
        (self.state, self.ledger)
    }
}

fn decode_call(
    valset: RawValset<'_>,
    signatures: RawSignatures<'_>,
) -> BridgeResult<(ValidatorSet, SignatureBundle)> {
    let valset = valset.to_valset()?;
    let signatures = signatures.to_bundle()?;
    Ok((valset, signatures))
}
