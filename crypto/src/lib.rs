//! Cryptographic primitives for sigdrop.
//!
//! - **secp256k1** recoverable ECDSA for claim authorizations (Ethereum-compatible)
//! - **keccak-256** for digests and address derivation
//! - EIP-191 personal-message hashing
//! - EIP-55 checksummed address rendering and parsing

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{parse_address, to_checksum};
pub use error::CryptoError;
pub use hash::{keccak256, keccak256_multi, personal_message_hash};
pub use keys::{address_from_private, generate_keypair, keypair_from_private};
pub use sign::{parse_signature, recover_address, sign_prehash};
