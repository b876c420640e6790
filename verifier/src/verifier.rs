//! Trusted-signer verification.

use crate::digest::DigestBuilder;
use crate::error::VerifyError;
use sigdrop_crypto::{parse_signature, recover_address, CryptoError};
use sigdrop_types::{Address, RecoverableSignature};

/// Recovers claim signers and checks them against the trusted issuer.
///
/// Pure: holds only the immutable trusted signer and the deployment's digest scheme.
#[derive(Clone, Debug)]
pub struct SignatureVerifier {
    trusted_signer: Address,
    digest: DigestBuilder,
}

impl SignatureVerifier {
    pub fn new(trusted_signer: Address, digest: DigestBuilder) -> Self {
        Self {
            trusted_signer,
            digest,
        }
    }

    pub fn trusted_signer(&self) -> &Address {
        &self.trusted_signer
    }

    pub fn digest_builder(&self) -> &DigestBuilder {
        &self.digest
    }

    /// Length and structural checks only; no key recovery is attempted.
    ///
    /// The returned signature is canonical (`v` in {27, 28}), so the 0/1 and
    /// 27/28 encodings of one authorization are the same ledger key.
    pub fn check_format(signature: &[u8]) -> Result<RecoverableSignature, VerifyError> {
        let mut sig = RecoverableSignature::from_slice(signature).map_err(|_| {
            VerifyError::InvalidSignatureLength {
                actual: signature.len(),
                expected: RecoverableSignature::LEN,
            }
        })?;
        parse_signature(&sig).map_err(VerifyError::MalformedSignature)?;
        if sig.0[64] < 27 {
            sig.0[64] += 27;
        }
        Ok(sig)
    }

    /// Recover whoever signed the claim digest for `(claimant, amount)`.
    pub fn recover(
        &self,
        claimant: &Address,
        amount: u128,
        signature: &RecoverableSignature,
    ) -> Result<Address, VerifyError> {
        let digest = self.digest.digest(claimant, amount);
        recover_address(&digest, signature).map_err(|e| match e {
            CryptoError::RecoveryFailed => VerifyError::UnauthorizedSigner { recovered: None },
            other => VerifyError::MalformedSignature(other),
        })
    }

    /// Recover the signer of an already format-checked signature and require it
    /// to be the trusted signer.
    pub fn validate(
        &self,
        claimant: &Address,
        amount: u128,
        signature: &RecoverableSignature,
    ) -> Result<Address, VerifyError> {
        let recovered = self.recover(claimant, amount, signature)?;
        if recovered != self.trusted_signer {
            return Err(VerifyError::UnauthorizedSigner {
                recovered: Some(recovered),
            });
        }
        Ok(recovered)
    }

    /// Full check from raw bytes: format, recovery, trusted-signer comparison.
    pub fn recover_and_validate(
        &self,
        claimant: &Address,
        amount: u128,
        signature: &[u8],
    ) -> Result<Address, VerifyError> {
        let sig = Self::check_format(signature)?;
        self.validate(claimant, amount, &sig)
    }
}
