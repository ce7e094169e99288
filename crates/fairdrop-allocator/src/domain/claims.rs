//! # Claim Tracker
//!
//! Single-use bookkeeping for presale claims. Two interchangeable strategies
//! behind one interface, selected once at construction:
//!
//! - `PerPrincipal`: a principal set — uniqueness keyed by caller identity.
//! - `PerPosition`: one bit per whitelist slot inside packed 64-bit words —
//!   cheaper, keyed by position.
//!
//! Marks are never cleared. Marking must be the last state change before
//! minting so no window exists in which a re-entered call could claim twice.

use crate::domain::entities::{ClaimKey, ClaimMode};
use crate::domain::value_objects::Address;
use crate::errors::AllocatorError;
use std::collections::HashSet;

/// Records and queries "already claimed" under the configured strategy.
#[derive(Clone, Debug)]
pub enum ClaimTracker {
    /// Principal → flag.
    PerPrincipal(HashSet<Address>),
    /// Position → bit inside a packed word.
    PerPosition(Vec<u64>),
}

impl ClaimTracker {
    /// Creates an empty tracker for the given mode.
    #[must_use]
    pub fn for_mode(mode: ClaimMode) -> Self {
        match mode {
            ClaimMode::PerPrincipal => Self::PerPrincipal(HashSet::new()),
            ClaimMode::PerPosition => Self::PerPosition(Vec::new()),
        }
    }

    /// Returns the mode this tracker was constructed with.
    #[must_use]
    pub fn mode(&self) -> ClaimMode {
        match self {
            Self::PerPrincipal(_) => ClaimMode::PerPrincipal,
            Self::PerPosition(_) => ClaimMode::PerPosition,
        }
    }

    /// Returns true if the key is already marked.
    ///
    /// A key of the wrong kind for this tracker's mode reads as unclaimed;
    /// the service only constructs mode-matching keys.
    #[must_use]
    pub fn has_claimed(&self, key: ClaimKey) -> bool {
        match (self, key) {
            (Self::PerPrincipal(set), ClaimKey::Principal(principal)) => set.contains(&principal),
            (Self::PerPosition(bits), ClaimKey::Position(position)) => {
                let word = (position / 64) as usize;
                let bit = position % 64;
                bits.get(word).is_some_and(|w| w & (1u64 << bit) != 0)
            }
            _ => false,
        }
    }

    /// Marks the key as claimed. Fails with `AlreadyClaimed` if already set.
    ///
    /// # Errors
    ///
    /// - `AlreadyClaimed` — the key was marked before.
    /// - `Internal` — the key kind does not match the tracker mode.
    pub fn mark_claimed(&mut self, key: ClaimKey) -> Result<(), AllocatorError> {
        if self.has_claimed(key) {
            return Err(AllocatorError::AlreadyClaimed);
        }
        match (self, key) {
            (Self::PerPrincipal(set), ClaimKey::Principal(principal)) => {
                set.insert(principal);
                Ok(())
            }
            (Self::PerPosition(bits), ClaimKey::Position(position)) => {
                let word = (position / 64) as usize;
                let bit = position % 64;
                if bits.len() <= word {
                    bits.resize(word + 1, 0);
                }
                bits[word] |= 1u64 << bit;
                Ok(())
            }
            _ => Err(AllocatorError::Internal(
                "claim key kind does not match tracker mode".to_string(),
            )),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
