use proptest::prelude::*;

use sigdrop_ledger::{ClaimLedger, LedgerError, LedgerSnapshot};
use sigdrop_types::{Address, RecoverableSignature};

fn sig(n: u16) -> RecoverableSignature {
    let mut bytes = [0u8; 65];
    bytes[..2].copy_from_slice(&n.to_be_bytes());
    bytes[64] = 27;
    RecoverableSignature(bytes)
}

proptest! {
    /// The claimed total never decreases and never exceeds max supply, whatever
    /// sequence of claims (including replays) is attempted.
    #[test]
    fn total_is_monotonic_and_bounded(
        max_supply in 0u128..1_000,
        attempts in prop::collection::vec((0u16..32, 0u128..200), 0..64),
    ) {
        let mut ledger = ClaimLedger::new(max_supply);
        let mut previous = 0u128;
        for (id, amount) in attempts {
            let before = ledger.claim_count();
            match ledger.record(sig(id), Address::new([1; 20]), amount) {
                Ok(total) => {
                    prop_assert_eq!(total, previous + amount);
                    prop_assert_eq!(ledger.claim_count(), before + 1);
                }
                Err(LedgerError::SignatureAlreadyUsed) => {
                    prop_assert!(ledger.is_consumed(&sig(id)));
                    prop_assert_eq!(ledger.total_claimed(), previous);
                }
                Err(LedgerError::SupplyExhausted { requested, remaining }) => {
                    prop_assert_eq!(requested, amount);
                    prop_assert!(requested > remaining);
                    prop_assert_eq!(ledger.total_claimed(), previous);
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
            prop_assert!(ledger.total_claimed() >= previous);
            prop_assert!(ledger.total_claimed() <= max_supply);
            previous = ledger.total_claimed();
        }
        prop_assert!(ledger.verify_integrity().is_ok());
    }

    /// A snapshot taken at any point restores to an identical ledger.
    #[test]
    fn snapshot_restore_preserves_everything(
        max_supply in 0u128..10_000,
        attempts in prop::collection::vec((0u16..512, 0u128..500), 0..48),
    ) {
        let mut ledger = ClaimLedger::new(max_supply);
        for (id, amount) in &attempts {
            let _ = ledger.record(sig(*id), Address::new([2; 20]), *amount);
        }
        let bytes = ledger.snapshot().to_bytes().unwrap();
        let restored = ClaimLedger::restore(&LedgerSnapshot::from_bytes(&bytes).unwrap()).unwrap();
        prop_assert_eq!(restored.total_claimed(), ledger.total_claimed());
        prop_assert_eq!(restored.claim_count(), ledger.claim_count());
        for (id, _) in attempts {
            prop_assert_eq!(restored.is_consumed(&sig(id)), ledger.is_consumed(&sig(id)));
        }
    }
}
