//! Claim authorization engine.
//!
//! Accepts signed claim requests, checks them against the trusted signer and
//! the airdrop's quotas, and mints through a [`MintGateway`] the engine holds
//! exclusive authority over. All claim state lives in one [`ClaimLedger`]
//! guarded by the engine.
//!
//! [`MintGateway`]: sigdrop_token::MintGateway
//! [`ClaimLedger`]: sigdrop_ledger::ClaimLedger

pub mod config;
pub mod engine;
pub mod error;
pub mod event;

pub use config::{AirdropConfig, SchemeConfig};
pub use engine::{ClaimEngine, ClaimReceipt};
pub use error::{ClaimError, ConfigError};
pub use event::{ClaimEvent, EventBus};
