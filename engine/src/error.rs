use sigdrop_crypto::CryptoError;
use sigdrop_ledger::LedgerError;
use sigdrop_token::TokenError;
use sigdrop_types::Address;
use sigdrop_verifier::VerifyError;
use thiserror::Error;

/// Why a claim was rejected. No variant leaves any trace in the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength { actual: usize, expected: usize },

    #[error("malformed signature: {0}")]
    MalformedSignature(CryptoError),

    #[error("signature was not issued by the trusted signer")]
    UnauthorizedSigner { recovered: Option<Address> },

    #[error("engine does not hold mint authority (current authority: {authority})")]
    EngineNotAuthorized { authority: Address },

    #[error("amount {amount} exceeds per-claim cap {cap}")]
    AmountExceedsPerClaimCap { amount: u128, cap: u128 },

    #[error("supply exhausted: requested {requested}, remaining {remaining}")]
    SupplyExhausted { requested: u128, remaining: u128 },

    #[error("signature has already been used")]
    SignatureAlreadyUsed,

    #[error("mint failed: {0}")]
    Mint(TokenError),

    /// Unreachable while the ledger lock is held across check and record.
    #[error("ledger error: {0}")]
    Ledger(LedgerError),
}

impl ClaimError {
    /// Short stable label for logs and counters.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSignatureLength { .. } => "invalid_signature_length",
            Self::MalformedSignature(_) => "malformed_signature",
            Self::UnauthorizedSigner { .. } => "unauthorized_signer",
            Self::EngineNotAuthorized { .. } => "engine_not_authorized",
            Self::AmountExceedsPerClaimCap { .. } => "amount_exceeds_per_claim_cap",
            Self::SupplyExhausted { .. } => "supply_exhausted",
            Self::SignatureAlreadyUsed => "signature_already_used",
            Self::Mint(_) => "mint_failed",
            Self::Ledger(_) => "ledger_error",
        }
    }
}

impl From<VerifyError> for ClaimError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::InvalidSignatureLength { actual, expected } => {
                Self::InvalidSignatureLength { actual, expected }
            }
            VerifyError::MalformedSignature(e) => Self::MalformedSignature(e),
            VerifyError::UnauthorizedSigner { recovered } => Self::UnauthorizedSigner { recovered },
        }
    }
}

impl From<LedgerError> for ClaimError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::SignatureAlreadyUsed => Self::SignatureAlreadyUsed,
            LedgerError::SupplyExhausted {
                requested,
                remaining,
            } => Self::SupplyExhausted {
                requested,
                remaining,
            },
            other => Self::Ledger(other),
        }
    }
}

/// Configuration and construction errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("max_per_claim ({max_per_claim}) exceeds max_supply ({max_supply})")]
    PerClaimCapExceedsSupply { max_per_claim: u128, max_supply: u128 },

    #[error("trusted signer must not be the zero address")]
    ZeroTrustedSigner,

    #[error("token must not be the zero address")]
    ZeroToken,

    #[error("gateway address {actual} does not match configured token {expected}")]
    GatewayMismatch { expected: Address, actual: Address },

    #[error("snapshot max supply {snapshot} does not match configured max supply {config}")]
    SnapshotMismatch { snapshot: u128, config: u128 },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
