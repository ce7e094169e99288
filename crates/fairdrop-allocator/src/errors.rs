//! # Error Types
//!
//! All error types for the allocation engine.
//!
//! Every rejected operation surfaces a distinct, stable reason; the four
//! messages asserted verbatim by the reference scenarios ("Not whitelisted",
//! "Insufficient ETH", "Only transfer calls allowed", "from cannot be zero")
//! are preserved exactly.

use crate::domain::entities::SalePhase;
use crate::domain::value_objects::{Address, TokenId, U256};
use thiserror::Error;

// =============================================================================
// ALLOCATOR ERRORS
// =============================================================================

/// Errors surfaced to callers of the allocation engine.
///
/// Every error aborts the whole operation with no partial state change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocatorError {
    /// Operation is not callable in the current phase.
    #[error("wrong sale phase: required {required}, current {current}")]
    WrongPhase {
        /// Phase the operation requires.
        required: SalePhase,
        /// Phase the engine is in.
        current: SalePhase,
    },

    /// The (position, principal, proof) triple failed whitelist verification.
    #[error("Not whitelisted")]
    NotWhitelisted,

    /// Caller is not the configured operator.
    #[error("caller is not the operator")]
    NotOperator,

    /// Payment below the fixed public mint fee.
    #[error("Insufficient ETH")]
    InsufficientPayment,

    /// Batched transfer names the zero address as sender.
    #[error("from cannot be zero")]
    ZeroSender,

    /// Revealed secret does not match the stored commitment digest.
    #[error("secret does not match commitment")]
    SecretMismatch,

    /// The claim key was already marked.
    #[error("already claimed")]
    AlreadyClaimed,

    /// Reveal attempted with no live commitment for the caller.
    #[error("no commit found")]
    NoCommitFound,

    /// Withdrawal attempted with a zero owed balance.
    #[error("nothing to withdraw")]
    NothingToWithdraw,

    /// The allocation pool is fully minted.
    #[error("supply exhausted: cap {cap}")]
    SupplyExhausted {
        /// Pool size.
        cap: u64,
    },

    /// Batch contains a call that is not a well-formed transfer.
    #[error("Only transfer calls allowed")]
    DisallowedOperation,

    /// Token vault collaborator failure.
    #[error("vault error: {0}")]
    Vault(#[from] VaultError),

    /// Payout channel collaborator failure.
    #[error("payout error: {0}")]
    Payout(#[from] PayoutError),

    /// Internal error (should not happen in production).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error taxonomy classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller lacks the right phase, whitelist standing, or operator role.
    Authorization,
    /// Malformed or insufficient input.
    Validation,
    /// Operation conflicts with already-recorded state.
    State,
    /// Batch contains a disallowed operation.
    Guard,
    /// Collaborator or engine fault.
    Internal,
}

impl AllocatorError {
    /// Classifies this error into the taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WrongPhase { .. } | Self::NotWhitelisted | Self::NotOperator => {
                ErrorKind::Authorization
            }
            Self::InsufficientPayment | Self::ZeroSender | Self::SecretMismatch => {
                ErrorKind::Validation
            }
            Self::AlreadyClaimed
            | Self::NoCommitFound
            | Self::NothingToWithdraw
            | Self::SupplyExhausted { .. } => ErrorKind::State,
            Self::DisallowedOperation => ErrorKind::Guard,
            Self::Vault(_) | Self::Payout(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

// =============================================================================
// COLLABORATOR ERRORS
// =============================================================================

/// Errors from the token vault collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Mint attempted for an identifier that already exists.
    #[error("token already minted: {0}")]
    TokenExists(TokenId),

    /// Operation referenced an identifier the vault never minted.
    #[error("unknown token: {0}")]
    UnknownToken(TokenId),

    /// Transfer sender does not own the token.
    #[error("{sender} does not own token {token_id}")]
    NotTokenOwner {
        /// Claimed sender.
        sender: Address,
        /// Token in question.
        token_id: TokenId,
    },
}

/// Errors from the payout channel collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayoutError {
    /// The channel refused or failed the transfer.
    #[error("payout of {amount} to {to} failed: {reason}")]
    TransferFailed {
        /// Intended recipient.
        to: Address,
        /// Amount that failed to move.
        amount: U256,
        /// Channel-reported reason.
        reason: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================
