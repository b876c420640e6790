//! Claim digest construction.

use crate::domain::Eip712Domain;
use serde::{Deserialize, Serialize};
use sigdrop_crypto::{keccak256, keccak256_multi, personal_message_hash};
use sigdrop_types::{u128_to_word, Address};
use std::fmt;
use std::str::FromStr;

pub const CLAIM_TYPE: &str = "Claim(address claimant,uint256 amount)";

/// The encoding a deployment accepts, without its domain data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    PersonalSign,
    TypedData,
}

impl SchemeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalSign => "personal_sign",
            Self::TypedData => "typed_data",
        }
    }
}

impl FromStr for SchemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "personal_sign" | "personal" | "eip191" => Ok(Self::PersonalSign),
            "typed_data" | "typed" | "eip712" => Ok(Self::TypedData),
            other => Err(format!(
                "unknown scheme {other:?}, expected personal_sign or typed_data"
            )),
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the 32-byte digest a claim signature must cover.
///
/// Exactly one variant is active per deployment; the shape of an incoming
/// signature never selects the scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DigestBuilder {
    PersonalSign,
    /// The separator is computed once, when the builder is created.
    TypedData {
        domain: Eip712Domain,
        separator: [u8; 32],
    },
}

impl DigestBuilder {
    pub fn personal_sign() -> Self {
        Self::PersonalSign
    }

    pub fn typed_data(domain: Eip712Domain) -> Self {
        let separator = domain.separator();
        Self::TypedData { domain, separator }
    }

    pub fn scheme(&self) -> SchemeKind {
        match self {
            Self::PersonalSign => SchemeKind::PersonalSign,
            Self::TypedData { .. } => SchemeKind::TypedData,
        }
    }

    pub fn domain(&self) -> Option<&Eip712Domain> {
        match self {
            Self::PersonalSign => None,
            Self::TypedData { domain, .. } => Some(domain),
        }
    }

    pub fn domain_separator(&self) -> Option<[u8; 32]> {
        match self {
            Self::PersonalSign => None,
            Self::TypedData { separator, .. } => Some(*separator),
        }
    }

    /// `keccak256(claimant[20] ‖ amount[32])`, the tightly packed claim hash.
    pub fn packed_claim_hash(claimant: &Address, amount: u128) -> [u8; 32] {
        keccak256_multi(&[claimant.as_bytes(), &u128_to_word(amount)])
    }

    /// EIP-712 `hashStruct(Claim)`.
    pub fn struct_hash(claimant: &Address, amount: u128) -> [u8; 32] {
        keccak256_multi(&[
            &keccak256(CLAIM_TYPE.as_bytes()),
            &claimant.to_word(),
            &u128_to_word(amount),
        ])
    }

    /// The 32-byte prehash the trusted signer must have signed for this claim.
    pub fn digest(&self, claimant: &Address, amount: u128) -> [u8; 32] {
        match self {
            Self::PersonalSign => {
                personal_message_hash(&Self::packed_claim_hash(claimant, amount))
            }
            Self::TypedData { separator, .. } => keccak256_multi(&[
                b"\x19\x01",
                separator,
                &Self::struct_hash(claimant, amount),
            ]),
        }
    }
}
