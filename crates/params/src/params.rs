use std::{fs, path::Path, str::FromStr};

use alloy_primitives::{keccak256, Address, U256};
use peggy_crypto::digest::checkpoint_digest;
use peggy_primitives::{validator::ValidatorSet, BridgeId, Digest};
use serde::{Deserialize, Serialize};

use crate::{errors::ParamsError, serde_helpers::serde_u256_dec};

/// A validator entry in a parameter file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorParams {
    pub address: Address,
    #[serde(with = "serde_u256_dec")]
    pub power: U256,
}

impl ValidatorParams {
    pub fn new(address: Address, power: U256) -> Self {
        Self { address, power }
    }
}

/// Parses `<address>:<power>`, with the power in decimal or `0x` hex.
impl FromStr for ValidatorParams {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParamsError::MalformedValidator(s.to_owned());

        let (address, power) = s.split_once(':').ok_or_else(malformed)?;
        let address = Address::from_str(address.trim()).map_err(|_| malformed())?;
        let power = U256::from_str(power.trim()).map_err(|_| malformed())?;

        Ok(Self { address, power })
    }
}

/// Everything fixed when a bridge instance is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeParams {
    /// Unique per deployment, mixed into every digest.
    pub bridge_id: BridgeId,

    /// Minimum attested power for any claim.
    #[serde(with = "serde_u256_dec")]
    pub power_threshold: U256,

    /// Genesis validator set, in checkpoint order.
    pub validators: Vec<ValidatorParams>,
}

impl BridgeParams {
    /// Builds params whose bridge id is the hash of a deployment name.
    pub fn from_name(name: &str, power_threshold: U256, validators: Vec<ValidatorParams>) -> Self {
        Self {
            bridge_id: keccak256(name.as_bytes()),
            power_threshold,
            validators,
        }
    }

    /// Builds the genesis validator set.
    pub fn validator_set(&self) -> Result<ValidatorSet, ParamsError> {
        let set = ValidatorSet::from_pairs(self.validators.iter().map(|v| (v.address, v.power)))?;
        Ok(set)
    }

    /// Checks that the parameters describe a bridge that can authorize
    /// claims.
    ///
    /// A zero threshold is accepted: such a bridge honors claims without any
    /// signature.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let set = self.validator_set()?;
        if set.total_power() < self.power_threshold {
            return Err(ParamsError::ThresholdExceedsTotalPower {
                threshold: self.power_threshold,
                total: set.total_power(),
            });
        }

        Ok(())
    }

    /// Checkpoint of the genesis validator set at nonce 0.
    pub fn genesis_checkpoint(&self) -> Result<Digest, ParamsError> {
        Ok(checkpoint_digest(self.bridge_id, 0, &self.validator_set()?))
    }

    /// Reads and validates params from a JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let raw = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&raw)?;
        params.validate()?;
        Ok(params)
    }

    /// Writes params to a JSON file.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), ParamsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
