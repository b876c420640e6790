//! Keccak-256 hashing and EIP-191 personal-message hashing.

use sha3::{Digest, Keccak256};

/// Prefix prepended by `personal_sign` / `eth_sign` before hashing.
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Compute the keccak-256 hash of arbitrary data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn keccak256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Hash a message the way `personal_sign` does:
/// `keccak256("\x19Ethereum Signed Message:\n" ‖ len(message) ‖ message)`,
/// with the length written in decimal ASCII.
pub fn personal_message_hash(message: &[u8]) -> [u8; 32] {
    let len = message.len().to_string();
    keccak256_multi(&[PERSONAL_MESSAGE_PREFIX, len.as_bytes(), message])
}
