//! Issuing side: the trusted signer producing claim authorizations.

use crate::digest::DigestBuilder;
use sigdrop_crypto::{address_from_private, sign_prehash, CryptoError};
use sigdrop_types::{Address, ClaimRequest, PrivateKey, RecoverableSignature};

/// Holds the trusted signer's key and signs claims under one digest scheme.
pub struct ClaimIssuer {
    private: PrivateKey,
    address: Address,
    digest: DigestBuilder,
}

impl ClaimIssuer {
    pub fn new(private: PrivateKey, digest: DigestBuilder) -> Result<Self, CryptoError> {
        let address = address_from_private(&private)?;
        Ok(Self {
            private,
            address,
            digest,
        })
    }

    /// The address engines must configure as their trusted signer.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn digest_builder(&self) -> &DigestBuilder {
        &self.digest
    }

    /// Authorize `claimant` to claim `amount`.
    pub fn sign(&self, claimant: &Address, amount: u128) -> Result<RecoverableSignature, CryptoError> {
        let digest = self.digest.digest(claimant, amount);
        sign_prehash(&digest, &self.private)
    }

    /// Sign and package a ready-to-submit request.
    pub fn issue(&self, claimant: Address, amount: u128) -> Result<ClaimRequest, CryptoError> {
        let sig = self.sign(&claimant, amount)?;
        Ok(ClaimRequest::new(claimant, amount, sig.as_bytes().to_vec()))
    }
}
