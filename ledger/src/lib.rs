//! Claim ledger.
//!
//! Tracks how much of the airdrop supply has been claimed and which signatures
//! have already been redeemed. Pure state: no I/O and no calls to the token.
//! The owner (the claim engine) serializes check-and-record under its own lock.

pub mod error;
pub mod ledger;
pub mod snapshot;

pub use error::LedgerError;
pub use ledger::{ClaimLedger, ConsumedClaim};
pub use snapshot::{LedgerSnapshot, SnapshotEntry, CURRENT_SNAPSHOT_VERSION};
