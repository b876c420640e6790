use crate::error::TokenError;
use sigdrop_types::Address;

/// Minting capability of a token whose mint is restricted to one authority.
///
/// The claim engine holds a gateway and must itself be the current authority
/// for claims to succeed. Implementations take `&self`; any interior state
/// must be synchronized.
pub trait MintGateway: Send + Sync {
    /// Address of the token, matched against the engine's configured token.
    fn address(&self) -> Address;

    /// The single address currently allowed to mint.
    fn current_authority(&self) -> Address;

    /// Credit `amount` new units to `recipient`, raising total supply.
    fn mint(&self, caller: Address, recipient: Address, amount: u128) -> Result<(), TokenError>;
}
