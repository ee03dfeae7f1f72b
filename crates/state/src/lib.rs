//! Persisted state of the verification core: the validator-set commitment
//! and the set of withdrawal ids already honored.
//!
//! Everything that mutates state goes through a two step flow. Checks run
//! against `&self` and produce a [`StateBatch`]; the batch is applied with
//! `&mut self` only once the caller has decided to commit.

mod batch;
mod errors;
mod replay;
mod valset;

pub use batch::{BridgeState, StateBatch};
pub use errors::StateError;
pub use replay::ReplayGuard;
pub use valset::{ValsetCommit, ValsetState};
