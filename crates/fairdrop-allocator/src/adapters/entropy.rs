//! # Entropy Adapters
//!
//! `SystemEntropy` mixes wall-clock time with a monotonically increasing
//! draw counter, so the word consumed by a reveal is fixed only when the
//! reveal executes — after the commitment is already durably recorded.
//! `FixedEntropy` returns a constant for deterministic tests.

use crate::domain::services::keccak256;
use crate::domain::value_objects::Hash;
use crate::ports::outbound::EntropySource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Execution-context entropy: keccak over wall-clock nanos and a draw counter.
#[derive(Debug, Default)]
pub struct SystemEntropy {
    draws: AtomicU64,
}

impl SystemEntropy {
    /// Creates a fresh source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntropySource for SystemEntropy {
    fn draw(&self) -> Hash {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        let counter = self.draws.fetch_add(1, Ordering::Relaxed);

        let mut data = [0u8; 16];
        data[..8].copy_from_slice(&nanos.to_be_bytes());
        data[8..].copy_from_slice(&counter.to_be_bytes());
        keccak256(&data)
    }
}

/// Deterministic entropy stub for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy(pub Hash);

impl FixedEntropy {
    /// Creates a stub returning the given word on every draw.
    #[must_use]
    pub const fn new(word: Hash) -> Self {
        Self(word)
    }
}

impl Default for FixedEntropy {
    fn default() -> Self {
        Self(Hash::new([0x42; 32]))
    }
}

impl EntropySource for FixedEntropy {
    fn draw(&self) -> Hash {
        self.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
