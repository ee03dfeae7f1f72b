use peggy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// Records emitted by successful calls, consumed by relayers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// Tokens were locked for transfer to `destination` on the other chain.
    Deposit {
        token: Address,
        destination: B256,
        amount: U256,
    },

    /// Tokens were released from custody.
    Withdraw {
        token: Address,
        destination: Address,
        amount: U256,
    },

    /// A new validator set is in effect.
    ValsetUpdated {
        addresses: Vec<Address>,
        powers: Vec<U256>,
        nonce: u64,
    },
}
