//! Recoverable ECDSA signing over 32-byte prehashed digests.

use crate::error::CryptoError;
use crate::keys::{address_of, signing_key};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sigdrop_types::{Address, PrivateKey, RecoverableSignature};

/// Split a 65-byte signature into its ECDSA body and recovery id.
///
/// Accepts `v` as 27/28 (Ethereum convention) or 0/1. Rejects high-s signatures,
/// which are malleable twins of a valid low-s signature.
pub fn parse_signature(sig: &RecoverableSignature) -> Result<(Signature, RecoveryId), CryptoError> {
    let v = sig.v();
    let normalized = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        other => return Err(CryptoError::InvalidRecoveryId(other)),
    };
    let recovery_id = RecoveryId::from_byte(normalized).ok_or(CryptoError::InvalidRecoveryId(v))?;
    let signature = Signature::from_slice(sig.rs()).map_err(|_| CryptoError::InvalidScalars)?;
    if signature.normalize_s().is_some() {
        return Err(CryptoError::HighS);
    }
    Ok((signature, recovery_id))
}

/// Sign a 32-byte digest, returning `r ‖ s ‖ v` with low-s and `v ∈ {27, 28}`.
pub fn sign_prehash(
    digest: &[u8; 32],
    private_key: &PrivateKey,
) -> Result<RecoverableSignature, CryptoError> {
    let key = signing_key(private_key)?;
    let (mut signature, mut recovery_id) = key
        .sign_prehash_recoverable(digest)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    if let Some(low) = signature.normalize_s() {
        signature = low;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }
    let mut out = [0u8; 65];
    out[..64].copy_from_slice(&signature.to_bytes());
    out[64] = 27 + recovery_id.to_byte();
    Ok(RecoverableSignature(out))
}

/// Recover the address that produced `sig` over `digest`.
pub fn recover_address(
    digest: &[u8; 32],
    sig: &RecoverableSignature,
) -> Result<Address, CryptoError> {
    let (signature, recovery_id) = parse_signature(sig)?;
    let key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;
    Ok(address_of(&key))
}
