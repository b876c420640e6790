use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("signature has already been used")]
    SignatureAlreadyUsed,

    #[error("supply exhausted: requested {requested}, remaining {remaining}")]
    SupplyExhausted { requested: u128, remaining: u128 },

    #[error("arithmetic overflow in claimed total")]
    Overflow,

    #[error("corrupt snapshot: {reason}")]
    CorruptSnapshot { reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}
