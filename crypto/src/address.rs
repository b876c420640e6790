//! EIP-55 mixed-case checksum addresses.
//!
//! The checksum capitalises hex letter `i` of the lowercase address when nibble `i`
//! of `keccak256(lowercase_hex)` is 8 or above. All-lowercase and all-uppercase
//! inputs carry no checksum and are accepted as-is.

use crate::error::CryptoError;
use crate::hash::keccak256;
use sigdrop_types::Address;

/// Render an address in EIP-55 checksummed form.
pub fn to_checksum(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0F
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse an address, enforcing the EIP-55 checksum when the input is mixed-case.
pub fn parse_address(s: &str) -> Result<Address, CryptoError> {
    let address: Address = s.parse()?;
    let trimmed = s.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&address)[2..] != *body {
        return Err(CryptoError::BadChecksum);
    }
    Ok(address)
}
