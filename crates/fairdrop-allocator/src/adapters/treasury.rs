//! # In-Memory Treasury
//!
//! Payout channel adapters. `InMemoryTreasury` records settled payouts for
//! assertions; `FailingTreasury` refuses every transfer so rollback paths
//! can be exercised.

use crate::domain::value_objects::{Address, U256};
use crate::errors::PayoutError;
use crate::ports::outbound::ValueTransfer;
use async_trait::async_trait;
use std::sync::RwLock;

/// Records every payout it settles.
#[derive(Debug, Default)]
pub struct InMemoryTreasury {
    payouts: RwLock<Vec<(Address, U256)>>,
}

impl InMemoryTreasury {
    /// Creates an empty treasury.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total amount paid to a principal across all settlements.
    #[must_use]
    pub fn paid_to(&self, principal: Address) -> U256 {
        self.payouts
            .read()
            .unwrap()
            .iter()
            .filter(|(to, _)| *to == principal)
            .fold(U256::zero(), |acc, (_, amount)| acc.saturating_add(*amount))
    }

    /// Number of settlements performed.
    #[must_use]
    pub fn settlement_count(&self) -> usize {
        self.payouts.read().unwrap().len()
    }
}

#[async_trait]
impl ValueTransfer for InMemoryTreasury {
    async fn pay(&self, to: Address, amount: U256) -> Result<(), PayoutError> {
        self.payouts.write().unwrap().push((to, amount));
        Ok(())
    }
}

/// Refuses every payout. Test double for the rollback path.
#[derive(Debug, Default)]
pub struct FailingTreasury;

#[async_trait]
impl ValueTransfer for FailingTreasury {
    async fn pay(&self, to: Address, amount: U256) -> Result<(), PayoutError> {
        Err(PayoutError::TransferFailed {
            to,
            amount,
            reason: "channel closed".to_string(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
