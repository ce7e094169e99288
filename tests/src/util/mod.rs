//! Shared test fixtures.

pub mod merkle;

pub use merkle::WhitelistFixture;

use fairdrop_allocator::prelude::Address;

/// Deterministic test principal.
#[must_use]
pub fn addr(byte: u8) -> Address {
    Address::new([byte; 20])
}
