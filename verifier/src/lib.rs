//! Claim signature verification.
//!
//! A trusted issuer signs "`claimant` may claim `amount`". Two encodings are supported,
//! one per deployment:
//! 1. **PersonalSign**: `keccak256(claimant ‖ amount)` signed with the EIP-191
//!    `"\x19Ethereum Signed Message:\n32"` prefix.
//! 2. **TypedData**: EIP-712 `Claim(address claimant,uint256 amount)` bound to a domain
//!    naming the engine's address, chain id, name and version.
//!
//! The [`SignatureVerifier`] recovers the signer and checks it against the trusted issuer;
//! the [`ClaimIssuer`] is the issuing side of the same encoding.

pub mod digest;
pub mod domain;
pub mod error;
pub mod issuer;
pub mod verifier;

pub use digest::{DigestBuilder, SchemeKind, CLAIM_TYPE};
pub use domain::{Eip712Domain, EIP712_DOMAIN_TYPE};
pub use error::VerifyError;
pub use issuer::ClaimIssuer;
pub use verifier::SignatureVerifier;
