use peggy_primitives::{Address, U256};

use crate::errors::LedgerError;

/// Token custody as seen from the bridge.
pub trait Ledger {
    /// Moves `amount` of `token` from `from` into bridge custody.
    fn lock(&mut self, token: Address, amount: U256, from: Address) -> Result<(), LedgerError>;

    /// Releases `amount` of `token` from bridge custody to `destination`.
    fn unlock(
        &mut self,
        token: Address,
        destination: Address,
        amount: U256,
    ) -> Result<(), LedgerError>;

    /// Returns how much of `token` `account` holds.
    fn balance_of(&self, token: Address, account: Address) -> U256;
}
