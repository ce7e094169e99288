//! # Contribution Ledger
//!
//! Pull-payment account book: owed amounts are credited per principal and
//! withdrawn by the credited principal, never pushed.
//!
//! The withdrawal path zeroes the balance *before* any funds leave
//! (effects-before-interaction), and the service restores it if the payout
//! channel fails, keeping the no-partial-state policy intact.

use crate::domain::value_objects::{Address, U256};
use crate::errors::AllocatorError;
use std::collections::HashMap;

/// Owed-balance book, principal → wei.
#[derive(Clone, Debug, Default)]
pub struct ContributionLedger {
    balances: HashMap<Address, U256>,
}

impl ContributionLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increases the principal's owed balance by `amount`.
    pub fn credit(&mut self, principal: Address, amount: U256) {
        let balance = self.balances.entry(principal).or_insert_with(U256::zero);
        *balance = balance.saturating_add(amount);
    }

    /// Returns the principal's current owed balance.
    #[must_use]
    pub fn balance_of(&self, principal: Address) -> U256 {
        self.balances
            .get(&principal)
            .copied()
            .unwrap_or_else(U256::zero)
    }

    /// Zeroes and returns the principal's balance.
    ///
    /// # Errors
    ///
    /// `NothingToWithdraw` if the balance is zero — a repeat withdrawal fails
    /// cleanly rather than paying out zero.
    pub fn take_balance(&mut self, principal: Address) -> Result<U256, AllocatorError> {
        match self.balances.remove(&principal) {
            Some(amount) if !amount.is_zero() => Ok(amount),
            _ => Err(AllocatorError::NothingToWithdraw),
        }
    }

    /// Puts a taken balance back. Used only to roll back a failed payout.
    pub fn restore(&mut self, principal: Address, amount: U256) {
        self.credit(principal, amount);
    }
}

// =============================================================================
// TESTS
// =============================================================================
