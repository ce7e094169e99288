//! # Event Schema
//!
//! Typed notifications appended by the engine for every accepted operation,
//! carrying the relevant principal and amount/identifier. Observers and
//! tests drain these; rejected operations emit nothing.

use crate::domain::entities::SalePhase;
use crate::domain::value_objects::{Address, Hash, TokenId, U256};
use serde::{Deserialize, Serialize};

/// A notification emitted by an accepted operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationEvent {
    /// The operator advanced the sale phase.
    PhaseChanged {
        /// Phase before the change.
        from: SalePhase,
        /// Phase after the change.
        to: SalePhase,
    },

    /// A commitment was recorded (or overwritten) during presale.
    CommitRecorded {
        /// Committing principal.
        principal: Address,
        /// Stored commitment digest.
        digest: Hash,
    },

    /// A reveal succeeded and minted a token.
    TokenRevealed {
        /// Revealing principal, now the token owner.
        principal: Address,
        /// Assigned identifier.
        token_id: TokenId,
    },

    /// A fee-paying public mint succeeded.
    PublicMinted {
        /// Minting principal.
        principal: Address,
        /// Assigned identifier.
        token_id: TokenId,
        /// Payment attached to the mint.
        paid: U256,
    },

    /// A contribution was credited to a principal's ledger entry.
    ContributionCredited {
        /// Principal that funded the credit.
        from: Address,
        /// Principal whose owed balance increased.
        beneficiary: Address,
        /// Credited amount.
        amount: U256,
    },

    /// An owed balance was withdrawn in full.
    WithdrawalSettled {
        /// Withdrawing principal.
        principal: Address,
        /// Amount paid out.
        amount: U256,
    },

    /// A guarded batch of transfers dispatched.
    BatchExecuted {
        /// Calling principal.
        principal: Address,
        /// Number of transfers dispatched.
        transfers: usize,
    },
}

// =============================================================================
// TESTS
// =============================================================================
