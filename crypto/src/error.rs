use sigdrop_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid recovery byte {0}, expected 0, 1, 27 or 28")]
    InvalidRecoveryId(u8),

    #[error("signature s value is in the upper half of the curve order")]
    HighS,

    #[error("signature r or s is zero or out of range")]
    InvalidScalars,

    #[error("public key recovery failed")]
    RecoveryFailed,

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    #[error("address checksum mismatch")]
    BadChecksum,

    #[error(transparent)]
    Types(#[from] TypesError),
}
