//! Token custody collaborator of the bridge core.
//!
//! The core never moves funds itself. It asks a [`Ledger`] to lock tokens on
//! deposit and to release them on an authorized withdrawal.

mod errors;
mod ledger;
mod memory;

pub use errors::LedgerError;
pub use ledger::Ledger;
pub use memory::MemoryLedger;
