use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// A request to release `amount` of `token` to `destination`, identified by
/// a unique `id` chosen on the source chain.
///
/// Only `id`, `amount` and `destination` are covered by the validators'
/// signatures; `token` selects which ledger the funds are released from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalClaim {
    pub id: B256,
    pub token: Address,
    pub destination: Address,
    pub amount: U256,
}

impl WithdrawalClaim {
    pub fn new(id: B256, token: Address, destination: Address, amount: U256) -> Self {
        Self {
            id,
            token,
            destination,
            amount,
        }
    }
}
