use std::collections::BTreeMap;

use peggy_primitives::{Address, U256};
use tracing::trace;

use crate::{errors::LedgerError, ledger::Ledger};

/// In-memory [`Ledger`] keeping per-token balances.
///
/// Locked funds are credited to a dedicated custody account, so the bridge's
/// holdings are visible through [`Ledger::balance_of`] like any other
/// account's.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    custody: Address,
    balances: BTreeMap<(Address, Address), U256>,
}

impl MemoryLedger {
    pub fn new(custody: Address) -> Self {
        Self {
            custody,
            balances: BTreeMap::new(),
        }
    }

    /// Address holding all locked funds.
    pub fn custody(&self) -> Address {
        self.custody
    }

    /// Credits `amount` of `token` to `account` out of thin air.
    pub fn mint(
        &mut self,
        token: Address,
        account: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.credit(token, account, amount)
    }

    fn credit(
        &mut self,
        token: Address,
        account: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let balance = self.balances.entry((token, account)).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { token, account })?;
        Ok(())
    }

    fn balance(&self, token: Address, account: Address) -> U256 {
        self.balances
            .get(&(token, account))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let available = self.balance(token, from);
        if available < amount {
            return Err(if from == self.custody {
                LedgerError::InsufficientCustody {
                    token,
                    available,
                    requested: amount,
                }
            } else {
                LedgerError::InsufficientBalance {
                    token,
                    account: from,
                    available,
                    requested: amount,
                }
            });
        }

        if from == to {
            return Ok(());
        }

        // credit first so an overflow leaves both balances untouched
        self.credit(token, to, amount)?;
        self.balances.insert((token, from), available - amount);

        trace!(%token, %from, %to, %amount, "ledger transfer");
        Ok(())
    }
}

impl Ledger for MemoryLedger {
    fn lock(&mut self, token: Address, amount: U256, from: Address) -> Result<(), LedgerError> {
        self.transfer(token, from, self.custody, amount)
    }

    fn unlock(
        &mut self,
        token: Address,
        destination: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.transfer(token, self.custody, destination, amount)
    }

    fn balance_of(&self, token: Address, account: Address) -> U256 {
        self.balance(token, account)
    }
}
