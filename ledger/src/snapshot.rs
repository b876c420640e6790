//! Ledger snapshots: the consumed-signature set and claimed total at a point in time.
//!
//! The snapshot hash is computed deterministically over the sorted entries so
//! a restored ledger can be checked against what was written.

use serde::{Deserialize, Serialize};

use sigdrop_crypto::keccak256;
use sigdrop_types::{u128_to_word, Address, RecoverableSignature};

use crate::error::LedgerError;

pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Keccak-256 over the header fields and every entry.
    pub hash: [u8; 32],
    pub version: u32,
    pub max_supply: u128,
    pub total_claimed: u128,
    /// Sorted by signature bytes.
    pub claims: Vec<SnapshotEntry>,
}

/// One redeemed signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub signature: RecoverableSignature,
    pub claimant: Address,
    pub amount: u128,
}

impl LedgerSnapshot {
    pub fn create(max_supply: u128, total_claimed: u128, mut claims: Vec<SnapshotEntry>) -> Self {
        claims.sort_by(|a, b| a.signature.as_bytes().cmp(b.signature.as_bytes()));
        let mut snap = Self {
            hash: [0u8; 32],
            version: CURRENT_SNAPSHOT_VERSION,
            max_supply,
            total_claimed,
            claims,
        };
        snap.hash = snap.compute_hash();
        snap
    }

    fn compute_hash(&self) -> [u8; 32] {
        let mut preimage = Vec::with_capacity(68 + self.claims.len() * 117);
        preimage.extend_from_slice(&self.version.to_be_bytes());
        preimage.extend_from_slice(&u128_to_word(self.max_supply));
        preimage.extend_from_slice(&u128_to_word(self.total_claimed));
        for entry in &self.claims {
            preimage.extend_from_slice(entry.signature.as_bytes());
            preimage.extend_from_slice(entry.claimant.as_bytes());
            preimage.extend_from_slice(&u128_to_word(entry.amount));
        }
        keccak256(&preimage)
    }

    /// Verify the snapshot hash and version.
    pub fn verify(&self) -> bool {
        self.version == CURRENT_SNAPSHOT_VERSION && self.hash == self.compute_hash()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: u8, amount: u128) -> SnapshotEntry {
        SnapshotEntry {
            signature: RecoverableSignature([n; 65]),
            claimant: Address::new([n; 20]),
            amount,
        }
    }

    #[test]
    fn create_and_verify() {
        let snap = LedgerSnapshot::create(10, 3, vec![entry(1, 1), entry(2, 2)]);
        assert!(snap.verify());
        assert_eq!(snap.claim_count(), 2);
        assert_eq!(snap.version, CURRENT_SNAPSHOT_VERSION);
    }

    #[test]
    fn entry_order_does_not_change_hash() {
        let a = LedgerSnapshot::create(10, 3, vec![entry(1, 1), entry(2, 2)]);
        let b = LedgerSnapshot::create(10, 3, vec![entry(2, 2), entry(1, 1)]);
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.claims, b.claims);
    }

    #[test]
    fn tampered_snapshot_fails_verification() {
        let mut snap = LedgerSnapshot::create(10, 3, vec![entry(1, 1), entry(2, 2)]);
        snap.max_supply = 100;
        assert!(!snap.verify());
    }

    #[test]
    fn unknown_version_fails_verification() {
        let mut snap = LedgerSnapshot::create(10, 0, vec![]);
        snap.version = 2;
        snap.hash = snap.compute_hash();
        assert!(!snap.verify());
    }

    #[test]
    fn bytes_roundtrip() {
        let snap = LedgerSnapshot::create(10, 3, vec![entry(1, 1), entry(2, 2)]);
        let bytes = snap.to_bytes().unwrap();
        let restored = LedgerSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(restored, snap);
        assert!(restored.verify());
    }

    #[test]
    fn garbage_bytes_rejected() {
        assert!(matches!(
            LedgerSnapshot::from_bytes(&[0xFF; 7]),
            Err(LedgerError::Serialization(_))
        ));
    }
}
