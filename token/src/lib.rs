//! The token side of an airdrop.
//!
//! [`MintGateway`] is the only surface the claim engine sees. [`OwnableToken`]
//! is an in-process implementation whose mint is gated on a single owner.

pub mod error;
pub mod gateway;
pub mod token;

pub use error::TokenError;
pub use gateway::MintGateway;
pub use token::{OwnableToken, TokenEvent};
