//! Orchestration layer of the Peggy verification core.
//!
//! [`BridgeCore`] ties the digest builder, the power aggregator and the
//! persisted state together into the three operations a relayer can call:
//! deposit, withdraw and validator set rotation.

mod bridge;
mod errors;
mod events;
mod handle;
mod relay;

pub use bridge::BridgeCore;
pub use errors::{BridgeError, BridgeResult};
pub use events::BridgeEvent;
pub use handle::SharedBridge;
pub use relay::{RawSignatures, RawValset};
