//! Chain identifier used for typed-data domain separation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EIP-155 chain id of the network an engine is deployed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const MAINNET: Self = Self(1);
    pub const GOERLI: Self = Self(5);
    pub const HARDHAT: Self = Self(31337);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// ABI encoding as `uint256`.
    pub fn to_word(&self) -> [u8; 32] {
        crate::u128_to_word(self.0 as u128)
    }

    /// Human-readable name for well-known chains.
    pub fn name(&self) -> Option<&'static str> {
        match self.0 {
            1 => Some("mainnet"),
            5 => Some("goerli"),
            31337 => Some("hardhat"),
            _ => None,
        }
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::MAINNET
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}
