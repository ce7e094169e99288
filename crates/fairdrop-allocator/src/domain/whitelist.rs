//! # Whitelist Verifier
//!
//! Merkle inclusion verification for (position, principal) whitelist entries
//! against an immutable root.
//!
//! The verifier is a pure function of its inputs: it recomputes the leaf
//! digest, folds the supplied sibling path in canonical (sorted-pair) order,
//! and compares the accumulator to the root. It never enforces single-use —
//! that is the claim tracker's job — so the same proof revalidates
//! idempotently.

use crate::domain::services::{hash_sorted_pair, whitelist_leaf};
use crate::domain::value_objects::{Address, Hash};

/// Validates whitelist membership proofs against a fixed root.
#[derive(Clone, Copy, Debug)]
pub struct WhitelistVerifier {
    root: Hash,
}

impl WhitelistVerifier {
    /// Creates a verifier for the given root. The root is immutable for the
    /// verifier's lifetime.
    #[must_use]
    pub const fn new(root: Hash) -> Self {
        Self { root }
    }

    /// Returns the configured root.
    #[must_use]
    pub const fn root(&self) -> Hash {
        self.root
    }

    /// Verifies that (position, principal) is included under the root.
    ///
    /// `proof` is the sibling digest path from the leaf to the root, as
    /// emitted by the offline tree generator.
    #[must_use]
    pub fn verify(&self, position: u64, principal: Address, proof: &[Hash]) -> bool {
        let mut acc = whitelist_leaf(position, principal);
        for sibling in proof {
            acc = hash_sorted_pair(acc, *sibling);
        }
        acc == self.root
    }
}

// =============================================================================
// TESTS
// =============================================================================
