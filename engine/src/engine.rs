//! The claim authorization engine.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use sigdrop_ledger::{ClaimLedger, LedgerSnapshot};
use sigdrop_token::{MintGateway, TokenError};
use sigdrop_types::{Address, ClaimRequest};
use sigdrop_utils::StatsCounter;
use sigdrop_verifier::{DigestBuilder, SignatureVerifier};

use crate::config::AirdropConfig;
use crate::error::{ClaimError, ConfigError};
use crate::event::{ClaimEvent, EventBus};

const STAT_NAMES: &[&str] = &[
    "claims_processed",
    "claims_rejected",
    "amount_claimed",
    "invalid_signature_length",
    "malformed_signature",
    "unauthorized_signer",
    "engine_not_authorized",
    "amount_exceeds_per_claim_cap",
    "supply_exhausted",
    "signature_already_used",
    "mint_failed",
    "ledger_error",
];

/// Proof of a processed claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    pub claimant: Address,
    pub amount: u128,
    /// Claimed total after this claim.
    pub total_claimed: u128,
    pub remaining_supply: u128,
}

/// Verifies signed claims and mints through a gateway it holds authority over.
///
/// `Send + Sync`; share it behind an `Arc`. Check-and-commit against the
/// ledger is serialized by an internal mutex, so concurrent claims observe a
/// total order.
pub struct ClaimEngine<G: MintGateway + ?Sized> {
    address: Address,
    config: AirdropConfig,
    verifier: SignatureVerifier,
    gateway: Arc<G>,
    ledger: Mutex<ClaimLedger>,
    events: EventBus,
    stats: StatsCounter,
}

impl<G: MintGateway + ?Sized> ClaimEngine<G> {
    /// Create an engine living at `address` with an empty ledger.
    pub fn new(address: Address, config: AirdropConfig, gateway: Arc<G>) -> Result<Self, ConfigError> {
        let ledger = ClaimLedger::new(config.max_supply);
        Self::with_ledger(address, config, gateway, ledger)
    }

    /// Create an engine resuming from a previously taken ledger snapshot.
    pub fn restore(
        address: Address,
        config: AirdropConfig,
        gateway: Arc<G>,
        snapshot: &LedgerSnapshot,
    ) -> Result<Self, ConfigError> {
        if snapshot.max_supply != config.max_supply {
            return Err(ConfigError::SnapshotMismatch {
                snapshot: snapshot.max_supply,
                config: config.max_supply,
            });
        }
        let ledger = ClaimLedger::restore(snapshot)?;
        Self::with_ledger(address, config, gateway, ledger)
    }

    fn with_ledger(
        address: Address,
        config: AirdropConfig,
        gateway: Arc<G>,
        ledger: ClaimLedger,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let gateway_address = gateway.address();
        if gateway_address != config.token {
            return Err(ConfigError::GatewayMismatch {
                expected: config.token,
                actual: gateway_address,
            });
        }
        let verifier = SignatureVerifier::new(
            config.trusted_signer,
            config.scheme.digest_builder(address),
        );
        tracing::info!(
            engine = %address,
            token = %config.token,
            trusted_signer = %config.trusted_signer,
            scheme = %config.scheme.kind(),
            max_supply = config.max_supply,
            max_per_claim = config.max_per_claim,
            total_claimed = ledger.total_claimed(),
            "claim engine initialized"
        );
        Ok(Self {
            address,
            config,
            verifier,
            gateway,
            ledger: Mutex::new(ledger),
            events: EventBus::new(),
            stats: StatsCounter::new(STAT_NAMES),
        })
    }

    /// The ledger is only mutated after every check has passed, so a poisoned
    /// lock still guards a consistent ledger.
    fn lock_ledger(&self) -> MutexGuard<'_, ClaimLedger> {
        self.ledger
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Redeem `request`. Either the full amount is minted and the signature is
    /// consumed, or nothing changes.
    pub fn claim(&self, request: &ClaimRequest) -> Result<ClaimReceipt, ClaimError> {
        let result = self.process(request);
        match &result {
            Ok(receipt) => {
                self.stats.increment("claims_processed");
                self.stats
                    .add("amount_claimed", u64::try_from(receipt.amount).unwrap_or(u64::MAX));
                tracing::info!(
                    claimant = %receipt.claimant,
                    amount = receipt.amount,
                    total_claimed = receipt.total_claimed,
                    "claim processed"
                );
                self.events.emit(&ClaimEvent::ClaimProcessed {
                    claimant: receipt.claimant,
                    amount: receipt.amount,
                    total_claimed: receipt.total_claimed,
                });
            }
            Err(err) => {
                self.stats.increment("claims_rejected");
                self.stats.increment(err.reason());
                tracing::debug!(
                    claimant = %request.claimant,
                    amount = request.amount,
                    reason = err.reason(),
                    error = %err,
                    "claim rejected"
                );
                self.events.emit(&ClaimEvent::ClaimRejected {
                    claimant: request.claimant,
                    amount: request.amount,
                    reason: err.reason(),
                });
            }
        }
        result
    }

    /// Convenience form of [`claim`](Self::claim) taking the parts of a request.
    pub fn claim_airdrop(
        &self,
        claimant: Address,
        amount: u128,
        signature: &[u8],
    ) -> Result<ClaimReceipt, ClaimError> {
        self.claim(&ClaimRequest::new(claimant, amount, signature))
    }

    fn process(&self, request: &ClaimRequest) -> Result<ClaimReceipt, ClaimError> {
        let claimant = request.claimant;
        let amount = request.amount;

        let signature = SignatureVerifier::check_format(&request.signature)?;

        if amount > self.config.max_per_claim {
            return Err(ClaimError::AmountExceedsPerClaimCap {
                amount,
                cap: self.config.max_per_claim,
            });
        }

        let authority = self.gateway.current_authority();
        if authority != self.address {
            return Err(ClaimError::EngineNotAuthorized { authority });
        }

        self.verifier.validate(&claimant, amount, &signature)?;

        let mut ledger = self.lock_ledger();
        ledger.ensure_claimable(&signature, amount)?;

        if let Err(err) = self.gateway.mint(self.address, claimant, amount) {
            tracing::warn!(%claimant, amount, error = %err, "mint failed after checks passed");
            return Err(match err {
                TokenError::NotOwner { owner, .. } => {
                    ClaimError::EngineNotAuthorized { authority: owner }
                }
                other => ClaimError::Mint(other),
            });
        }

        let total_claimed = ledger.record(signature, claimant, amount)?;
        Ok(ClaimReceipt {
            claimant,
            amount,
            total_claimed,
            remaining_supply: ledger.remaining_supply(),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &AirdropConfig {
        &self.config
    }

    pub fn trusted_signer(&self) -> Address {
        self.config.trusted_signer
    }

    pub fn token(&self) -> Address {
        self.config.token
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn digest_builder(&self) -> &DigestBuilder {
        self.verifier.digest_builder()
    }

    /// EIP-712 domain separator; `None` for PersonalSign deployments.
    pub fn domain_separator(&self) -> Option<[u8; 32]> {
        self.verifier.digest_builder().domain_separator()
    }

    pub fn total_claimed(&self) -> u128 {
        self.lock_ledger().total_claimed()
    }

    pub fn remaining_supply(&self) -> u128 {
        self.lock_ledger().remaining_supply()
    }

    pub fn claim_count(&self) -> usize {
        self.lock_ledger().claim_count()
    }

    /// Whether `signature` has been redeemed, in either `v` encoding.
    /// Anything that could never pass the format check never was.
    pub fn is_consumed(&self, signature: &[u8]) -> bool {
        match SignatureVerifier::check_format(signature) {
            Ok(sig) => self.lock_ledger().is_consumed(&sig),
            Err(_) => false,
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.lock_ledger().snapshot()
    }

    /// Counters for processed and rejected claims, by rejection reason.
    pub fn stats(&self) -> BTreeMap<&'static str, u64> {
        self.stats.snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&ClaimEvent) + Send + Sync + 'static) {
        self.events.subscribe(Box::new(listener));
    }
}
