//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the allocation engine depends on. Adapters implement these to
//! provide:
//! - the base token capability (ownership bookkeeping and transfer),
//! - the native-value payout channel,
//! - reveal-time entropy.
//!
//! Dependencies point INWARD: adapters implement these traits; the engine
//! never knows which implementation it is talking to.

use crate::domain::value_objects::{Address, Hash, TokenId, U256};
use crate::errors::{PayoutError, VaultError};
use async_trait::async_trait;

// =============================================================================
// TOKEN VAULT (Base Token Capability)
// =============================================================================

/// Interface to the base token's ownership bookkeeping.
///
/// The engine consumes this as a given capability: it decides *which*
/// identifier to mint and *who* receives it; the vault owns the
/// owner-of/balance-of books and enforces transfer authority.
#[async_trait]
pub trait TokenVault: Send + Sync {
    /// Mints `token_id` to `owner`.
    ///
    /// # Errors
    ///
    /// `TokenExists` if the identifier was minted before. The engine
    /// pre-checks existence, so this surfacing indicates a fault.
    async fn mint(&self, owner: Address, token_id: TokenId) -> Result<(), VaultError>;

    /// Returns true if the identifier has been minted.
    async fn exists(&self, token_id: TokenId) -> bool;

    /// Transfers `token_id` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// `UnknownToken` or `NotTokenOwner`.
    async fn transfer(
        &self,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), VaultError>;

    /// Current owner of a token, if minted.
    async fn owner_of(&self, token_id: TokenId) -> Option<Address>;

    /// Number of tokens held by a principal.
    async fn balance_of(&self, owner: Address) -> u64;

    /// Token identifiers held by a principal, in mint/receive order.
    async fn tokens_of(&self, owner: Address) -> Vec<TokenId>;

    /// Total number of minted tokens.
    async fn minted_count(&self) -> u64;
}

// =============================================================================
// VALUE TRANSFER (Payout Channel)
// =============================================================================

/// Interface to the native-value payout channel used by withdrawals.
#[async_trait]
pub trait ValueTransfer: Send + Sync {
    /// Transfers `amount` of native value to `to`.
    ///
    /// # Errors
    ///
    /// `TransferFailed` if the channel refuses or fails the transfer; the
    /// engine rolls the owed balance back in that case.
    async fn pay(&self, to: Address, amount: U256) -> Result<(), PayoutError>;
}

// =============================================================================
// ENTROPY SOURCE (Reveal-Time Randomness)
// =============================================================================

/// Interface for entropy unavailable at commit time.
///
/// Production implementations draw from execution-context data fixed only
/// after the commitment is durably recorded; tests inject a deterministic
/// stub so fairness and collision handling stay testable.
pub trait EntropySource: Send + Sync {
    /// Draws one 32-byte entropy word.
    fn draw(&self) -> Hash;
}

// =============================================================================
// TESTS
// =============================================================================
