use std::sync::Arc;

use parking_lot::Mutex;
use peggy_ledger_types::Ledger;
use peggy_primitives::{
    signature::EcdsaSignature, validator::ValidatorSet, withdrawal::WithdrawalClaim, Address,
    Digest, WithdrawalId, B256, U256,
};
use peggy_state::BridgeState;

use crate::{
    bridge::BridgeCore,
    errors::BridgeResult,
    events::BridgeEvent,
    relay::{RawSignatures, RawValset},
};

/// Clonable handle to a [`BridgeCore`] shared between threads.
///
/// Each call holds the lock for its whole duration, so calls from different
/// threads are applied one at a time.
#[derive(Debug)]
pub struct SharedBridge<L> {
    shared: Arc<Mutex<BridgeCore<L>>>,
}

impl<L> Clone for SharedBridge<L> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<L: Ledger> SharedBridge<L> {
    pub fn new(core: BridgeCore<L>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(core)),
        }
    }

    /// Runs `f` with exclusive access to the core.
    pub fn with_core<R>(&self, f: impl FnOnce(&mut BridgeCore<L>) -> R) -> R {
        let mut core = self.shared.lock();
        f(&mut core)
    }

    pub fn deposit(
        &self,
        from: Address,
        token: Address,
        destination: B256,
        amount: U256,
    ) -> BridgeResult<()> {
        self.with_core(|core| core.deposit(from, token, destination, amount))
    }

    pub fn withdraw(
        &self,
        claim: &WithdrawalClaim,
        current_set: &ValidatorSet,
        current_nonce: u64,
        signatures: &[EcdsaSignature],
    ) -> BridgeResult<()> {
        self.with_core(|core| core.withdraw(claim, current_set, current_nonce, signatures))
    }

    pub fn update_valset(
        &self,
        new_set: &ValidatorSet,
        new_nonce: u64,
        current_set: &ValidatorSet,
        current_nonce: u64,
        signatures: &[EcdsaSignature],
    ) -> BridgeResult<()> {
        self.with_core(|core| {
            core.update_valset(new_set, new_nonce, current_set, current_nonce, signatures)
        })
    }

    pub fn withdraw_raw(
        &self,
        claim: &WithdrawalClaim,
        current: RawValset<'_>,
        current_nonce: u64,
        signatures: RawSignatures<'_>,
    ) -> BridgeResult<()> {
        self.with_core(|core| core.withdraw_raw(claim, current, current_nonce, signatures))
    }

    pub fn update_valset_raw(
        &self,
        new: RawValset<'_>,
        new_nonce: u64,
        current: RawValset<'_>,
        current_nonce: u64,
        signatures: RawSignatures<'_>,
    ) -> BridgeResult<()> {
        self.with_core(|core| {
            core.update_valset_raw(new, new_nonce, current, current_nonce, signatures)
        })
    }

    pub fn last_checkpoint(&self) -> Digest {
        self.shared.lock().last_checkpoint()
    }

    pub fn valset_nonce(&self) -> u64 {
        self.shared.lock().valset_nonce()
    }

    pub fn is_processed(&self, id: &WithdrawalId) -> bool {
        self.shared.lock().is_processed(id)
    }

    pub fn take_events(&self) -> Vec<BridgeEvent> {
        self.shared.lock().take_events()
    }

    /// Copies out the current state, e.g. for persisting.
    pub fn snapshot(&self) -> BridgeState {
        self.shared.lock().state().clone()
    }
}
