//! Fundamental types for sigdrop.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, recoverable signatures, chain identifiers and claim requests.

pub mod address;
pub mod claim;
pub mod error;
pub mod keys;
pub mod network;

pub use address::Address;
pub use claim::ClaimRequest;
pub use error::TypesError;
pub use keys::{KeyPair, PrivateKey, RecoverableSignature};
pub use network::ChainId;

/// Left-pad a big-endian integer into a 32-byte ABI word (`uint256`).
pub fn u128_to_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}
