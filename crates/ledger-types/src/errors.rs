use peggy_primitives::{Address, U256};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The sender does not hold enough of the token.
    #[error("account {account} holds {available} of token {token}, needs {requested}")]
    InsufficientBalance {
        token: Address,
        account: Address,
        available: U256,
        requested: U256,
    },

    /// The bridge holds less of the token than it is asked to release.
    #[error("custody holds {available} of token {token}, needs {requested}")]
    InsufficientCustody {
        token: Address,
        available: U256,
        requested: U256,
    },

    /// A credit would overflow the recipient's balance.
    #[error("balance of {account} in token {token} overflows")]
    BalanceOverflow { token: Address, account: Address },

    /// Failure reported by an external ledger implementation.
    #[error("ledger: {0}")]
    Other(String),
}
