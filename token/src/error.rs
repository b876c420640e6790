//! Token errors.

use sigdrop_types::Address;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("caller {caller} is not the token owner ({owner})")]
    NotOwner { caller: Address, owner: Address },

    #[error("cannot mint to the zero address")]
    MintToZeroAddress,

    #[error("new owner is the zero address")]
    ZeroOwner,

    #[error("arithmetic overflow in token supply or balance")]
    Overflow,
}
