//! Owner-gated in-memory token.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use sigdrop_types::Address;

use crate::error::TokenError;
use crate::gateway::MintGateway;

/// Observable token state changes, in emission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    /// Mints are transfers from the zero address.
    Transfer {
        from: Address,
        to: Address,
        amount: u128,
    },
    OwnershipTransferred {
        previous: Address,
        new: Address,
    },
}

#[derive(Debug)]
struct TokenState {
    owner: Address,
    total_supply: u128,
    balances: HashMap<Address, u128>,
    events: Vec<TokenEvent>,
}

/// A fungible token where only the owner may mint.
///
/// Deploying an airdrop means handing ownership to the claim engine with
/// [`transfer_ownership`](Self::transfer_ownership).
#[derive(Debug)]
pub struct OwnableToken {
    address: Address,
    name: String,
    symbol: String,
    state: Mutex<TokenState>,
}

impl OwnableToken {
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        owner: Address,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            state: Mutex::new(TokenState {
                owner,
                total_supply: 0,
                balances: HashMap::new(),
                events: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, TokenState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn owner(&self) -> Address {
        self.state().owner
    }

    pub fn total_supply(&self) -> u128 {
        self.state().total_supply
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.state().balances.get(account).copied().unwrap_or(0)
    }

    /// All events emitted so far.
    pub fn events(&self) -> Vec<TokenEvent> {
        self.state().events.clone()
    }

    /// Mint `amount` to `to`. Only the current owner may call this.
    pub fn mint(&self, caller: Address, to: Address, amount: u128) -> Result<(), TokenError> {
        let mut state = self.state();
        if caller != state.owner {
            return Err(TokenError::NotOwner {
                caller,
                owner: state.owner,
            });
        }
        if to.is_zero() {
            return Err(TokenError::MintToZeroAddress);
        }
        let supply = state
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = state
            .balances
            .get(&to)
            .copied()
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        state.total_supply = supply;
        state.balances.insert(to, balance);
        state.events.push(TokenEvent::Transfer {
            from: Address::ZERO,
            to,
            amount,
        });
        tracing::debug!(token = %self.symbol, %to, amount, supply, "minted");
        Ok(())
    }

    /// Hand minting rights to `new_owner`. Only the current owner may call this.
    pub fn transfer_ownership(&self, caller: Address, new_owner: Address) -> Result<(), TokenError> {
        let mut state = self.state();
        if caller != state.owner {
            return Err(TokenError::NotOwner {
                caller,
                owner: state.owner,
            });
        }
        if new_owner.is_zero() {
            return Err(TokenError::ZeroOwner);
        }
        let previous = std::mem::replace(&mut state.owner, new_owner);
        state.events.push(TokenEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        tracing::info!(token = %self.symbol, %previous, new = %new_owner, "ownership transferred");
        Ok(())
    }
}

impl MintGateway for OwnableToken {
    fn address(&self) -> Address {
        self.address
    }

    fn current_authority(&self) -> Address {
        self.owner()
    }

    fn mint(&self, caller: Address, recipient: Address, amount: u128) -> Result<(), TokenError> {
        OwnableToken::mint(self, caller, recipient, amount)
    }
}
