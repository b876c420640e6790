#![no_main]

use libfuzzer_sys::fuzz_target;

use sigdrop_ledger::{ClaimLedger, LedgerSnapshot};

// Decoding and restoring arbitrary snapshot bytes never panics, and any
// ledger that restores satisfies its own invariants.
fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = LedgerSnapshot::from_bytes(data) else {
        return;
    };
    if let Ok(ledger) = ClaimLedger::restore(&snapshot) {
        assert!(ledger.total_claimed() <= ledger.max_supply());
        assert!(ledger.verify_integrity().is_ok());
        assert_eq!(ledger.claim_count(), snapshot.claim_count());
    }
});
