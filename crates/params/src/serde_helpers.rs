//! Serde helper modules for parameter files.
use std::str::FromStr;

use alloy_primitives::U256;
use serde::{de::Error, Deserialize, Deserializer, Serializer};

/// Serialize [`U256`] as a decimal string. Deserialization also accepts
/// `0x`-prefixed hex strings and plain JSON integers.
pub mod serde_u256_dec {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(u64),
        Str(String),
    }

    pub fn serialize<S: Serializer>(v: &U256, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&v.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<U256, D::Error> {
        match Repr::deserialize(d)? {
            Repr::Int(v) => Ok(U256::from(v)),
            Repr::Str(s) => U256::from_str(&s)
                .map_err(|e| D::Error::custom(format!("invalid uint256 {s}: {e}"))),
        }
    }
}
