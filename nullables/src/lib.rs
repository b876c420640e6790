//! Nullable infrastructure for deterministic testing.
//!
//! External collaborators of the claim engine are abstracted behind traits.
//! This crate provides test-friendly implementations that:
//! - Record every call for later assertions
//! - Can be scripted to fail or to change authority mid-test
//! - Never touch a real token
//!
//! Usage: swap real implementations for nullables in tests.

pub mod mint_gateway;

pub use mint_gateway::{MintCall, NullMintGateway};
