//! Deployment parameters of a bridge instance.

mod errors;
mod params;
pub mod serde_helpers;

pub use errors::ParamsError;
pub use params::{BridgeParams, ValidatorParams};
