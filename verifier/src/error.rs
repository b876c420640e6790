use sigdrop_crypto::CryptoError;
use sigdrop_types::Address;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength { actual: usize, expected: usize },

    #[error("malformed signature: {0}")]
    MalformedSignature(CryptoError),

    /// `recovered` is `None` when no public key could be recovered at all.
    #[error("signature was not issued by the trusted signer")]
    UnauthorizedSigner { recovered: Option<Address> },
}
