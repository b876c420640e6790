//! secp256k1 key generation and address derivation.

use crate::error::CryptoError;
use crate::hash::keccak256;
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use sigdrop_types::{Address, KeyPair, PrivateKey};
use zeroize::Zeroize;

/// Generate a new key pair from the operating system's entropy source.
pub fn generate_keypair() -> Result<KeyPair, CryptoError> {
    loop {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed).map_err(|e| CryptoError::Entropy(e.to_string()))?;
        // Zero and values above the curve order are rejected; draw again.
        let valid = SigningKey::from_slice(&seed).is_ok();
        let private = PrivateKey(seed);
        seed.zeroize();
        if valid {
            return keypair_from_private(private);
        }
    }
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> Result<KeyPair, CryptoError> {
    let address = address_from_private(&private)?;
    Ok(KeyPair { address, private })
}

/// Derive the address controlled by a private key.
pub fn address_from_private(private: &PrivateKey) -> Result<Address, CryptoError> {
    let signing_key = signing_key(private)?;
    Ok(address_of(signing_key.verifying_key()))
}

/// `keccak256(uncompressed_pubkey[1..])[12..]`.
pub(crate) fn address_of(key: &VerifyingKey) -> Address {
    let point = key.as_affine().to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Address::new(out)
}

pub(crate) fn signing_key(private: &PrivateKey) -> Result<SigningKey, CryptoError> {
    SigningKey::from_slice(&private.0).map_err(|_| CryptoError::InvalidPrivateKey)
}
