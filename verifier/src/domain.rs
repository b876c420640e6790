//! EIP-712 domain separator.

use serde::{Deserialize, Serialize};
use sigdrop_crypto::{keccak256, keccak256_multi};
use sigdrop_types::{Address, ChainId};

pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Binds typed-data signatures to one deployed engine on one chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: ChainId,
    /// Address of the claim engine that accepts these signatures.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: ChainId,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// `keccak256(typeHash ‖ keccak256(name) ‖ keccak256(version) ‖ chainId ‖ verifyingContract)`
    pub fn separator(&self) -> [u8; 32] {
        keccak256_multi(&[
            &keccak256(EIP712_DOMAIN_TYPE.as_bytes()),
            &keccak256(self.name.as_bytes()),
            &keccak256(self.version.as_bytes()),
            &self.chain_id.to_word(),
            &self.verifying_contract.to_word(),
        ])
    }
}
