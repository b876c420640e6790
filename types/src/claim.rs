//! Caller-supplied claim request.

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// A single redemption attempt: "`claimant` may claim `amount`", backed by `signature`.
///
/// The signature is kept as raw bytes because its length is only validated by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub claimant: Address,
    pub amount: u128,
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

impl ClaimRequest {
    pub fn new(claimant: Address, amount: u128, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            claimant,
            amount,
            signature: signature.into(),
        }
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        crate::error::decode_prefixed(&s).map_err(serde::de::Error::custom)
    }
}
