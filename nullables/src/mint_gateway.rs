//! Nullable mint gateway: records mints without a real token.

use sigdrop_token::{MintGateway, TokenError};
use sigdrop_types::Address;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A mint that went through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintCall {
    pub caller: Address,
    pub recipient: Address,
    pub amount: u128,
}

/// A test token that records mints instead of keeping balances.
///
/// Authority is enforced like a real owner-gated token: a caller other than
/// the current authority gets `TokenError::NotOwner`. Failures can be queued
/// with [`fail_next_mint`](Self::fail_next_mint) to exercise rollback paths.
/// Thread-safe for use from concurrent claim tests.
pub struct NullMintGateway {
    address: Address,
    authority: Mutex<Address>,
    mints: Mutex<Vec<MintCall>>,
    scripted_failures: Mutex<VecDeque<TokenError>>,
    /// Calls that reached `mint`, successful or not.
    attempts: Mutex<u64>,
}

impl NullMintGateway {
    pub fn new(address: Address, authority: Address) -> Self {
        Self {
            address,
            authority: Mutex::new(authority),
            mints: Mutex::new(Vec::new()),
            scripted_failures: Mutex::new(VecDeque::new()),
            attempts: Mutex::new(0),
        }
    }

    /// Move mint authority, as an ownership transfer would.
    pub fn set_authority(&self, authority: Address) {
        *self.authority.lock().unwrap() = authority;
    }

    /// Make the next `mint` call fail with `error`. Queued failures are consumed in order.
    pub fn fail_next_mint(&self, error: TokenError) {
        self.scripted_failures.lock().unwrap().push_back(error);
    }

    /// Get all successful mints (for assertions).
    pub fn mints(&self) -> Vec<MintCall> {
        self.mints.lock().unwrap().clone()
    }

    pub fn mint_attempts(&self) -> u64 {
        *self.attempts.lock().unwrap()
    }

    /// Sum of everything minted so far.
    pub fn total_minted(&self) -> u128 {
        self.mints.lock().unwrap().iter().map(|m| m.amount).sum()
    }

    pub fn minted_to(&self, recipient: &Address) -> u128 {
        self.mints
            .lock()
            .unwrap()
            .iter()
            .filter(|m| &m.recipient == recipient)
            .map(|m| m.amount)
            .sum()
    }
}

impl MintGateway for NullMintGateway {
    fn address(&self) -> Address {
        self.address
    }

    fn current_authority(&self) -> Address {
        *self.authority.lock().unwrap()
    }

    fn mint(&self, caller: Address, recipient: Address, amount: u128) -> Result<(), TokenError> {
        *self.attempts.lock().unwrap() += 1;
        if let Some(err) = self.scripted_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        let owner = self.current_authority();
        if caller != owner {
            return Err(TokenError::NotOwner { caller, owner });
        }
        self.mints.lock().unwrap().push(MintCall {
            caller,
            recipient,
            amount,
        });
        Ok(())
    }
}
