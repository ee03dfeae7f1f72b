use std::io;

use alloy_primitives::U256;
use peggy_primitives::errors::ValsetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("invalid validator set: {0}")]
    Valset(#[from] ValsetError),

    #[error("power threshold {threshold} exceeds total validator power {total}")]
    ThresholdExceedsTotalPower { threshold: U256, total: U256 },

    #[error("malformed validator entry '{0}', expected <address>:<power>")]
    MalformedValidator(String),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
