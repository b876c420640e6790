#![no_main]

use libfuzzer_sys::fuzz_target;

use sigdrop_types::RecoverableSignature;
use sigdrop_verifier::SignatureVerifier;

// Structural signature checks must never panic, and anything they accept
// must be exactly 65 bytes and come back with v in {27, 28}.
fuzz_target!(|data: &[u8]| {
    if let Ok(sig) = SignatureVerifier::check_format(data) {
        assert_eq!(data.len(), RecoverableSignature::LEN);
        assert!(matches!(sig.v(), 27 | 28));
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = text.parse::<RecoverableSignature>();
        let _ = sigdrop_crypto::parse_address(text);
    }
});
