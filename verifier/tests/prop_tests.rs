use proptest::prelude::*;

use sigdrop_types::{Address, ChainId, PrivateKey};
use sigdrop_verifier::{ClaimIssuer, DigestBuilder, Eip712Domain, SignatureVerifier, VerifyError};

const SIGNER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn builder(typed: bool) -> DigestBuilder {
    if typed {
        DigestBuilder::typed_data(Eip712Domain::new(
            "ProtocolAirdrop",
            "1",
            ChainId::HARDHAT,
            Address::new([0xE1; 20]),
        ))
    } else {
        DigestBuilder::personal_sign()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every issued authorization verifies for exactly the pair it was issued for.
    #[test]
    fn issued_signature_verifies(
        claimant in prop::array::uniform20(0u8..),
        amount in any::<u128>(),
        typed in any::<bool>(),
    ) {
        let digest = builder(typed);
        let issuer = ClaimIssuer::new(PrivateKey::from_hex(SIGNER_KEY).unwrap(), digest.clone()).unwrap();
        let verifier = SignatureVerifier::new(issuer.address(), digest);
        let claimant = Address::new(claimant);
        let sig = issuer.sign(&claimant, amount).unwrap();
        prop_assert_eq!(
            verifier.recover_and_validate(&claimant, amount, sig.as_bytes()),
            Ok(issuer.address())
        );
    }

    /// Changing the amount invalidates the authorization.
    #[test]
    fn amount_is_bound(
        claimant in prop::array::uniform20(0u8..),
        amount in 0u128..u128::MAX,
        typed in any::<bool>(),
    ) {
        let digest = builder(typed);
        let issuer = ClaimIssuer::new(PrivateKey::from_hex(SIGNER_KEY).unwrap(), digest.clone()).unwrap();
        let verifier = SignatureVerifier::new(issuer.address(), digest);
        let claimant = Address::new(claimant);
        let sig = issuer.sign(&claimant, amount).unwrap();
        let is_unauthorized = matches!(
            verifier.recover_and_validate(&claimant, amount + 1, sig.as_bytes()),
            Err(VerifyError::UnauthorizedSigner { .. })
        );
        prop_assert!(is_unauthorized);
    }

    /// Any byte string that is not 65 bytes long fails on length alone.
    #[test]
    fn wrong_length_never_recovers(bytes in prop::collection::vec(any::<u8>(), 0..130)) {
        prop_assume!(bytes.len() != 65);
        let verifier = SignatureVerifier::new(Address::new([1; 20]), DigestBuilder::personal_sign());
        prop_assert_eq!(
            verifier.recover_and_validate(&Address::new([2; 20]), 1, &bytes),
            Err(VerifyError::InvalidSignatureLength { actual: bytes.len(), expected: 65 })
        );
    }
}
