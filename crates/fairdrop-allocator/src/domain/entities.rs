//! # Core Domain Entities
//!
//! Main business entities for the allocation engine: the sale phase machine,
//! claim-tracking mode, commit records, and the engine configuration.

use crate::domain::value_objects::{Address, Hash, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SALE PHASE
// =============================================================================

/// The distribution phase.
///
/// Advanced by the operator only; downstream operations read the current
/// phase and reject with `WrongPhase` when it does not match. A phase change
/// never invalidates already-issued tokens or ledger balances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SalePhase {
    /// No minting entry point is open.
    Closed,
    /// Whitelisted principals may commit and reveal.
    Presale,
    /// Anyone may mint for the fixed fee.
    Public,
}

impl SalePhase {
    /// Returns true if `next` is a forward transition from `self`.
    #[must_use]
    pub fn is_forward(&self, next: SalePhase) -> bool {
        next > *self
    }
}

impl fmt::Display for SalePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Presale => write!(f, "presale"),
            Self::Public => write!(f, "public"),
        }
    }
}

// =============================================================================
// CLAIM MODE & KEY
// =============================================================================

/// Claim-tracking strategy, selected once at construction and never mixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimMode {
    /// Uniqueness keyed by caller identity (principal → flag).
    PerPrincipal,
    /// Uniqueness keyed by whitelist slot (position → packed bit).
    PerPosition,
}

/// The key under which a claim is recorded.
///
/// Captured at commit time so the reveal marks exactly the key that was
/// checked, regardless of mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimKey {
    /// Principal identity (PerPrincipal mode).
    Principal(Address),
    /// Whitelist position index (PerPosition mode).
    Position(u64),
}

impl ClaimMode {
    /// Builds the claim key for this mode from a (position, principal) pair.
    #[must_use]
    pub fn key_for(&self, position: u64, principal: Address) -> ClaimKey {
        match self {
            Self::PerPrincipal => ClaimKey::Principal(principal),
            Self::PerPosition => ClaimKey::Position(position),
        }
    }
}

// =============================================================================
// COMMIT RECORD
// =============================================================================

/// A pending commitment: the hidden-secret digest plus the claim key that was
/// validated when the commitment was recorded.
///
/// At most one live record per principal; a later commit overwrites it. A
/// record with no matching reveal stays pending indefinitely and costs one
/// map entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// `keccak256(principal ‖ secret)` as stored at commit time.
    pub digest: Hash,
    /// Claim key to mark on a successful reveal.
    pub key: ClaimKey,
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Immutable engine configuration, fixed at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Collection display name.
    pub name: String,
    /// Collection symbol.
    pub symbol: String,
    /// Merkle root over (position, principal) whitelist leaves.
    /// Sole source of truth for presale eligibility.
    pub whitelist_root: Hash,
    /// Claim-tracking strategy.
    pub claim_mode: ClaimMode,
    /// Size of the allocation pool; token ids are drawn from `0..max_supply`.
    pub max_supply: u64,
    /// Fixed fee for public minting, in wei.
    pub public_mint_fee: U256,
}

impl AllocatorConfig {
    /// Creates a configuration with the given root and claim mode and the
    /// default pool size and fee.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        whitelist_root: Hash,
        claim_mode: ClaimMode,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            whitelist_root,
            claim_mode,
            max_supply: Self::DEFAULT_MAX_SUPPLY,
            public_mint_fee: Self::default_fee(),
        }
    }

    /// Default pool size.
    pub const DEFAULT_MAX_SUPPLY: u64 = 10_000;

    /// Default public mint fee: 0.01 ether.
    #[must_use]
    pub fn default_fee() -> U256 {
        U256::from(10_000_000_000_000_000u64)
    }

    /// Overrides the pool size.
    #[must_use]
    pub fn with_max_supply(mut self, max_supply: u64) -> Self {
        self.max_supply = max_supply;
        self
    }

    /// Overrides the public mint fee.
    #[must_use]
    pub fn with_public_mint_fee(mut self, fee: U256) -> Self {
        self.public_mint_fee = fee;
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
