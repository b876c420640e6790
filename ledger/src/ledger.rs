//! In-memory claim ledger.

use crate::error::LedgerError;
use crate::snapshot::{LedgerSnapshot, SnapshotEntry};
use serde::{Deserialize, Serialize};
use sigdrop_types::{Address, RecoverableSignature};
use std::collections::HashMap;

/// What a redeemed signature paid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumedClaim {
    pub claimant: Address,
    pub amount: u128,
}

/// Cumulative claimed amount plus the append-only set of consumed signatures.
///
/// Invariants, holding after every successful `record`:
/// - `total_claimed <= max_supply`
/// - `total_claimed == Σ amount` over all consumed signatures
/// - a signature is never recorded twice and never removed
/// - signatures are keyed in canonical form, `v` in {27, 28}
#[derive(Clone, Debug)]
pub struct ClaimLedger {
    max_supply: u128,
    total_claimed: u128,
    used_signatures: HashMap<RecoverableSignature, ConsumedClaim>,
}

impl ClaimLedger {
    pub fn new(max_supply: u128) -> Self {
        Self {
            max_supply,
            total_claimed: 0,
            used_signatures: HashMap::new(),
        }
    }

    pub fn max_supply(&self) -> u128 {
        self.max_supply
    }

    pub fn total_claimed(&self) -> u128 {
        self.total_claimed
    }

    pub fn remaining_supply(&self) -> u128 {
        self.max_supply.saturating_sub(self.total_claimed)
    }

    /// Number of signatures redeemed so far.
    pub fn claim_count(&self) -> usize {
        self.used_signatures.len()
    }

    pub fn is_consumed(&self, signature: &RecoverableSignature) -> bool {
        self.used_signatures.contains_key(signature)
    }

    pub fn consumed(&self, signature: &RecoverableSignature) -> Option<&ConsumedClaim> {
        self.used_signatures.get(signature)
    }

    /// Precondition of [`record`](Self::record), checked in replay-then-supply order.
    pub fn ensure_claimable(
        &self,
        signature: &RecoverableSignature,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if self.is_consumed(signature) {
            return Err(LedgerError::SignatureAlreadyUsed);
        }
        let remaining = self.remaining_supply();
        if amount > remaining {
            return Err(LedgerError::SupplyExhausted {
                requested: amount,
                remaining,
            });
        }
        Ok(())
    }

    /// Consume `signature` and add `amount` to the claimed total.
    ///
    /// Re-checks the precondition; on error nothing is mutated.
    /// Returns the new claimed total.
    pub fn record(
        &mut self,
        signature: RecoverableSignature,
        claimant: Address,
        amount: u128,
    ) -> Result<u128, LedgerError> {
        self.ensure_claimable(&signature, amount)?;
        let total = self
            .total_claimed
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.used_signatures
            .insert(signature, ConsumedClaim { claimant, amount });
        self.total_claimed = total;
        Ok(total)
    }

    /// Recompute the claimed total from the consumed set and compare.
    pub fn verify_integrity(&self) -> Result<(), LedgerError> {
        let sum = self
            .used_signatures
            .values()
            .try_fold(0u128, |acc, c| acc.checked_add(c.amount))
            .ok_or(LedgerError::Overflow)?;
        if sum != self.total_claimed {
            return Err(LedgerError::CorruptSnapshot {
                reason: format!(
                    "claimed total {} does not match consumed sum {}",
                    self.total_claimed, sum
                ),
            });
        }
        if self.total_claimed > self.max_supply {
            return Err(LedgerError::CorruptSnapshot {
                reason: format!(
                    "claimed total {} exceeds max supply {}",
                    self.total_claimed, self.max_supply
                ),
            });
        }
        Ok(())
    }

    /// Capture the full ledger state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let entries = self
            .used_signatures
            .iter()
            .map(|(signature, claim)| SnapshotEntry {
                signature: *signature,
                claimant: claim.claimant,
                amount: claim.amount,
            })
            .collect();
        LedgerSnapshot::create(self.max_supply, self.total_claimed, entries)
    }

    /// Rebuild a ledger from a snapshot, rejecting any snapshot whose hash,
    /// entries or totals are inconsistent.
    ///
    /// Entries must already be canonical; a 0/1 `v` would never match the key
    /// a claim is checked under.
    pub fn restore(snapshot: &LedgerSnapshot) -> Result<Self, LedgerError> {
        if !snapshot.verify() {
            return Err(LedgerError::CorruptSnapshot {
                reason: "hash mismatch".into(),
            });
        }
        let mut used_signatures = HashMap::with_capacity(snapshot.claims.len());
        for entry in &snapshot.claims {
            if !matches!(entry.signature.v(), 27 | 28) {
                return Err(LedgerError::CorruptSnapshot {
                    reason: format!(
                        "signature {} has non-canonical v {}",
                        entry.signature,
                        entry.signature.v()
                    ),
                });
            }
            let claim = ConsumedClaim {
                claimant: entry.claimant,
                amount: entry.amount,
            };
            if used_signatures.insert(entry.signature, claim).is_some() {
                return Err(LedgerError::CorruptSnapshot {
                    reason: format!("duplicate signature {}", entry.signature),
                });
            }
        }
        let ledger = Self {
            max_supply: snapshot.max_supply,
            total_claimed: snapshot.total_claimed,
            used_signatures,
        };
        ledger.verify_integrity()?;
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(n: u8) -> RecoverableSignature {
        let mut bytes = [n; 65];
        bytes[64] = 27;
        RecoverableSignature(bytes)
    }

    fn account(n: u8) -> Address {
        Address::new([n; 20])
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = ClaimLedger::new(4);
        assert_eq!(ledger.total_claimed(), 0);
        assert_eq!(ledger.remaining_supply(), 4);
        assert_eq!(ledger.claim_count(), 0);
        assert!(!ledger.is_consumed(&sig(1)));
    }

    #[test]
    fn record_updates_total_and_set() {
        let mut ledger = ClaimLedger::new(4);
        assert_eq!(ledger.record(sig(1), account(1), 2), Ok(2));
        assert!(ledger.is_consumed(&sig(1)));
        assert_eq!(ledger.remaining_supply(), 2);
        assert_eq!(
            ledger.consumed(&sig(1)),
            Some(&ConsumedClaim {
                claimant: account(1),
                amount: 2
            })
        );
    }

    #[test]
    fn replay_rejected_without_mutation() {
        let mut ledger = ClaimLedger::new(10);
        ledger.record(sig(1), account(1), 2).unwrap();
        assert_eq!(
            ledger.record(sig(1), account(1), 2),
            Err(LedgerError::SignatureAlreadyUsed)
        );
        assert_eq!(ledger.total_claimed(), 2);
        assert_eq!(ledger.claim_count(), 1);
    }

    #[test]
    fn supply_exhaustion_scenario() {
        let mut ledger = ClaimLedger::new(4);
        ledger.record(sig(1), account(1), 2).unwrap();
        ledger.record(sig(2), account(2), 2).unwrap();
        assert_eq!(
            ledger.record(sig(3), account(3), 2),
            Err(LedgerError::SupplyExhausted {
                requested: 2,
                remaining: 0
            })
        );
        assert_eq!(ledger.total_claimed(), 4);
        assert!(!ledger.is_consumed(&sig(3)));
    }

    #[test]
    fn replay_checked_before_supply() {
        let mut ledger = ClaimLedger::new(2);
        ledger.record(sig(1), account(1), 2).unwrap();
        assert_eq!(
            ledger.ensure_claimable(&sig(1), 2),
            Err(LedgerError::SignatureAlreadyUsed)
        );
    }

    #[test]
    fn exact_fill_allowed() {
        let mut ledger = ClaimLedger::new(3);
        assert_eq!(ledger.record(sig(1), account(1), 3), Ok(3));
        assert_eq!(ledger.remaining_supply(), 0);
    }

    #[test]
    fn zero_amount_consumes_signature() {
        let mut ledger = ClaimLedger::new(0);
        assert_eq!(ledger.record(sig(1), account(1), 0), Ok(0));
        assert!(ledger.is_consumed(&sig(1)));
    }

    #[test]
    fn snapshot_restore_preserves_state() {
        let mut ledger = ClaimLedger::new(10);
        ledger.record(sig(1), account(1), 2).unwrap();
        ledger.record(sig(2), account(2), 3).unwrap();
        let restored = ClaimLedger::restore(&ledger.snapshot()).unwrap();
        assert_eq!(restored.total_claimed(), 5);
        assert_eq!(restored.max_supply(), 10);
        assert!(restored.is_consumed(&sig(1)));
        assert!(restored.is_consumed(&sig(2)));
    }

    #[test]
    fn restore_rejects_inconsistent_total() {
        let mut ledger = ClaimLedger::new(10);
        ledger.record(sig(1), account(1), 2).unwrap();
        let snap = ledger.snapshot();
        let forged = LedgerSnapshot::create(snap.max_supply, 7, snap.claims.clone());
        assert!(matches!(
            ClaimLedger::restore(&forged),
            Err(LedgerError::CorruptSnapshot { .. })
        ));
    }

    #[test]
    fn restore_rejects_total_above_supply() {
        let entries = vec![SnapshotEntry {
            signature: sig(1),
            claimant: account(1),
            amount: 5,
        }];
        let forged = LedgerSnapshot::create(4, 5, entries);
        assert!(matches!(
            ClaimLedger::restore(&forged),
            Err(LedgerError::CorruptSnapshot { .. })
        ));
    }

    #[test]
    fn restore_rejects_duplicate_signatures() {
        let entry = SnapshotEntry {
            signature: sig(1),
            claimant: account(1),
            amount: 1,
        };
        let forged = LedgerSnapshot::create(10, 2, vec![entry.clone(), entry]);
        assert!(matches!(
            ClaimLedger::restore(&forged),
            Err(LedgerError::CorruptSnapshot { .. })
        ));
    }

    #[test]
    fn restore_rejects_non_canonical_v() {
        for v in [0u8, 1, 29] {
            let mut signature = sig(1);
            signature.0[64] = v;
            let entry = SnapshotEntry {
                signature,
                claimant: account(1),
                amount: 1,
            };
            let forged = LedgerSnapshot::create(10, 1, vec![entry]);
            assert!(matches!(
                ClaimLedger::restore(&forged),
                Err(LedgerError::CorruptSnapshot { .. })
            ));
        }
    }

    #[test]
    fn restore_rejects_tampered_hash() {
        let mut ledger = ClaimLedger::new(10);
        ledger.record(sig(1), account(1), 2).unwrap();
        let mut snap = ledger.snapshot();
        snap.claims[0].amount = 1;
        snap.total_claimed = 1;
        assert_eq!(
            ClaimLedger::restore(&snap).unwrap_err(),
            LedgerError::CorruptSnapshot {
                reason: "hash mismatch".into()
            }
        );
    }
}
