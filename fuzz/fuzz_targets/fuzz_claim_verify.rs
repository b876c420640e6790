#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sigdrop_types::{Address, ChainId};
use sigdrop_verifier::{DigestBuilder, Eip712Domain, SignatureVerifier};

#[derive(Debug, Arbitrary)]
struct Input {
    claimant: [u8; 20],
    amount: u128,
    typed: bool,
    chain_id: u64,
    signature: Vec<u8>,
}

// Full recovery against arbitrary claims and signature bytes never panics.
fuzz_target!(|input: Input| {
    let builder = if input.typed {
        DigestBuilder::typed_data(Eip712Domain::new(
            "ProtocolAirdrop",
            "1",
            ChainId(input.chain_id),
            Address::new([0xEE; 20]),
        ))
    } else {
        DigestBuilder::personal_sign()
    };
    let verifier = SignatureVerifier::new(Address::new([0x11; 20]), builder);
    let _ = verifier.recover_and_validate(&Address::new(input.claimant), input.amount, &input.signature);
});
