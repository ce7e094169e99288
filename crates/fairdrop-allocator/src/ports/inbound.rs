//! # Driving Port (API - Inbound)
//!
//! The interface the allocation engine exposes to callers. The calling
//! principal is threaded explicitly through every operation signature —
//! there is no ambient "current sender" — so tests simulate arbitrary
//! callers deterministically.

use crate::domain::entities::SalePhase;
use crate::domain::value_objects::{Address, Hash, TokenId, U256};
use crate::errors::AllocatorError;
use async_trait::async_trait;

/// Primary API of the allocation engine.
///
/// Operator entry point: `set_phase`. Participant entry points: `commit`,
/// `reveal`, `public_mint`, `execute_batch`, `credit`, `withdraw`. The rest
/// are read-only queries.
#[async_trait]
pub trait AllocatorApi: Send + Sync {
    /// Advances the sale phase. Operator-only.
    ///
    /// # Errors
    ///
    /// `NotOperator` if `caller` is not the configured operator.
    async fn set_phase(&self, caller: Address, phase: SalePhase) -> Result<(), AllocatorError>;

    /// Records a presale commitment for `caller`.
    ///
    /// Overwrites any prior unrevealed commitment for the same caller.
    ///
    /// # Errors
    ///
    /// `WrongPhase`, `NotWhitelisted`, `AlreadyClaimed`.
    async fn commit(
        &self,
        caller: Address,
        position: u64,
        proof: &[Hash],
        secret: &[u8],
    ) -> Result<(), AllocatorError>;

    /// Reveals a commitment and mints the derived token to `caller`.
    ///
    /// # Errors
    ///
    /// `NoCommitFound`, `SecretMismatch`, `SupplyExhausted`, `AlreadyClaimed`.
    async fn reveal(&self, caller: Address, secret: &[u8]) -> Result<TokenId, AllocatorError>;

    /// Mints a token to `caller` for the attached payment.
    ///
    /// # Errors
    ///
    /// `WrongPhase`, `InsufficientPayment`, `SupplyExhausted`.
    async fn public_mint(&self, caller: Address, payment: U256)
        -> Result<TokenId, AllocatorError>;

    /// Validates and dispatches a batch of encoded transfer calls.
    ///
    /// # Errors
    ///
    /// `DisallowedOperation`, `ZeroSender`, or a vault ownership failure; a
    /// failing batch moves nothing.
    async fn execute_batch(
        &self,
        caller: Address,
        calls: &[Vec<u8>],
    ) -> Result<(), AllocatorError>;

    /// Credits the attached payment to `beneficiary`'s owed balance.
    ///
    /// # Errors
    ///
    /// Currently infallible business-wise; collaborator faults only.
    async fn credit(
        &self,
        caller: Address,
        beneficiary: Address,
        payment: U256,
    ) -> Result<(), AllocatorError>;

    /// Withdraws the caller's full owed balance through the payout channel.
    ///
    /// # Errors
    ///
    /// `NothingToWithdraw` on a zero balance; payout failures roll the
    /// balance back.
    async fn withdraw(&self, caller: Address) -> Result<U256, AllocatorError>;

    // -- Read-only queries ---------------------------------------------------

    /// Stored commitment digest for a principal, if any.
    async fn committed_digest(&self, principal: Address) -> Option<Hash>;

    /// Claimed status for a principal (PerPrincipal mode).
    async fn has_claimed_principal(&self, principal: Address) -> bool;

    /// Claimed status for a whitelist position (PerPosition mode).
    async fn has_claimed_position(&self, position: u64) -> bool;

    /// Current sale phase.
    async fn phase(&self) -> SalePhase;

    /// Fixed public mint fee.
    async fn public_mint_fee(&self) -> U256;

    /// Owed ledger balance for a principal.
    async fn contribution_balance(&self, principal: Address) -> U256;
}
