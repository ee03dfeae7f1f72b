//! Bridge test harness
//!
//! Wraps a [`BridgeCore`] over a [`MemoryLedger`] together with the keys of
//! the validator set currently in effect, so tests can produce correctly
//! signed (or deliberately broken) calls in one line.
//!
//! ```ignore
//! let mut harness = BridgeHarness::scenario_a();
//! let claim = harness.claim("tx1", 100);
//! harness.withdraw(&claim, &first(5))?;
//! ```

use peggy_bridge::{BridgeCore, BridgeResult};
use peggy_crypto::{
    digest::{checkpoint_digest, withdraw_digest},
    test_utils::{withdrawal_id, TestValidators},
};
use peggy_ledger_types::{Ledger, MemoryLedger};
use peggy_params::{BridgeParams, ValidatorParams};
use peggy_primitives::{
    signature::SignatureBundle, validator::ValidatorSet, withdrawal::WithdrawalClaim, Address,
    B256, U256,
};

/// Power of every validator in the default set.
pub const POWER: u64 = 1_000_000;

/// Deployment name hashed into the bridge id.
pub const BRIDGE_NAME: &str = "dfinance_peggy";

/// Funds pre-loaded into custody so withdrawals can be paid out.
pub const CUSTODY_FUNDS: u64 = 1_000_000;

pub fn token() -> Address {
    Address::repeat_byte(0xEE)
}

pub fn custody() -> Address {
    Address::repeat_byte(0xB0)
}

pub fn recipient() -> Address {
    Address::repeat_byte(0xD0)
}

/// Indices `0..n`.
pub fn first(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Splits a bundle into the `v`, `r`, `s` lists a relayer submits.
pub fn split_signatures(bundle: &SignatureBundle) -> (Vec<u8>, Vec<B256>, Vec<B256>) {
    let v = bundle.iter().map(|sig| sig.v).collect();
    let r = bundle.iter().map(|sig| sig.r).collect();
    let s = bundle.iter().map(|sig| sig.s).collect();
    (v, r, s)
}

/// Params for a bridge secured by `validators`.
pub fn params_for(validators: &TestValidators, threshold: u64) -> BridgeParams {
    let entries = validators
        .addresses()
        .into_iter()
        .zip(validators.powers())
        .map(|(address, power)| ValidatorParams::new(address, power))
        .collect();
    BridgeParams::from_name(BRIDGE_NAME, U256::from(threshold), entries)
}

/// A funded ledger with the default custody account.
pub fn funded_ledger() -> MemoryLedger {
    let mut ledger = MemoryLedger::new(custody());
    ledger
        .mint(token(), custody(), U256::from(CUSTODY_FUNDS))
        .expect("mint into empty ledger");
    ledger
}

#[derive(Debug)]
pub struct BridgeHarness {
    params: BridgeParams,
    validators: TestValidators,
    bridge: BridgeCore<MemoryLedger>,
}

impl BridgeHarness {
    pub fn new(validators: TestValidators, threshold: u64) -> Self {
        let params = params_for(&validators, threshold);
        let bridge = BridgeCore::new(&params, funded_ledger()).expect("valid test params");
        Self {
            params,
            validators,
            bridge,
        }
    }

    /// 10 validators of 1,000,000 power each, threshold 5,000,000.
    pub fn scenario_a() -> Self {
        Self::new(TestValidators::generate(10, POWER), 5 * POWER)
    }

    pub fn params(&self) -> &BridgeParams {
        &self.params
    }

    pub fn bridge(&self) -> &BridgeCore<MemoryLedger> {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut BridgeCore<MemoryLedger> {
        &mut self.bridge
    }

    /// Keys of the validator set currently in effect.
    pub fn validators(&self) -> &TestValidators {
        &self.validators
    }

    pub fn current_set(&self) -> ValidatorSet {
        self.validators.validator_set()
    }

    pub fn nonce(&self) -> u64 {
        self.bridge.valset_nonce()
    }

    pub fn claim(&self, label: &str, amount: u64) -> WithdrawalClaim {
        WithdrawalClaim::new(withdrawal_id(label), token(), recipient(), U256::from(amount))
    }

    pub fn sign_withdrawal(&self, claim: &WithdrawalClaim, signers: &[usize]) -> SignatureBundle {
        let digest = withdraw_digest(
            self.bridge.bridge_id(),
            claim.id,
            claim.amount,
            claim.destination,
        );
        self.validators.sign_subset(&digest, signers)
    }

    /// Submits `claim` signed by the current validators at `signers`.
    pub fn withdraw(&mut self, claim: &WithdrawalClaim, signers: &[usize]) -> BridgeResult<()> {
        let sigs = self.sign_withdrawal(claim, signers);
        let set = self.current_set();
        let nonce = self.nonce();
        self.bridge.withdraw(claim, &set, nonce, &sigs)
    }

    /// Signatures of the current validators at `signers` over the checkpoint
    /// of `next` at `nonce`.
    pub fn sign_rotation(
        &self,
        next: &TestValidators,
        nonce: u64,
        signers: &[usize],
    ) -> SignatureBundle {
        let checkpoint = checkpoint_digest(self.bridge.bridge_id(), nonce, &next.validator_set());
        self.validators.sign_subset(&checkpoint, signers)
    }

    /// Rotates to `next` at the following nonce, signed by the current
    /// validators at `signers`. The harness tracks `next` on success.
    pub fn rotate(&mut self, next: TestValidators, signers: &[usize]) -> BridgeResult<()> {
        let new_nonce = self.nonce() + 1;
        let sigs = self.sign_rotation(&next, new_nonce, signers);
        let current = self.current_set();
        let current_nonce = self.nonce();

        self.bridge
            .update_valset(&next.validator_set(), new_nonce, &current, current_nonce, &sigs)?;
        self.validators = next;
        Ok(())
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.bridge.ledger().balance_of(token(), account)
    }
}
