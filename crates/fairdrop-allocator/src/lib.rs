//! # FairDrop Allocator - Randomized Token Allocation Engine
//!
//! ## Purpose
//!
//! Allocation engine for a fixed-size pool of uniquely numbered tokens:
//! Merkle-whitelisted participants commit to a secret during the presale and
//! later reveal it to mint an unpredictably numbered token; everyone else can
//! mint for a fixed fee once the public phase opens. Participants who are
//! owed value pull it themselves from a contribution ledger.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Unique token identifiers, never above `max_supply` | `service.rs` - `allocate_from_seed()` |
//! | INVARIANT-2 | One claim per key (principal or position) | `domain/claims.rs` - `ClaimTracker::mark_claimed()` |
//! | INVARIANT-3 | Reveal entropy is drawn after the commitment | `service.rs` - `handle_reveal()` |
//! | INVARIANT-4 | Failed operations change no state | `service.rs` - every `handle_*` |
//! | INVARIANT-5 | Batches dispatch transfers only, no zero sender | `domain/batch.rs` - `validate_batch()` |
//! | INVARIANT-6 | Owed balances are zeroed before value moves | `service.rs` - `handle_withdraw()` |
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Token vault | `TokenVault` | Mint, transfer, ownership queries |
//! | Payout channel | `ValueTransfer` | Settle withdrawals |
//! | Entropy | `EntropySource` | Reveal-time randomness |
//!
//! ## Usage Example
//!
//! ```ignore
//! use fairdrop_allocator::prelude::*;
//!
//! let service = create_test_service(whitelist_root, ClaimMode::PerPrincipal);
//! service.set_phase(operator, SalePhase::Presale).await?;
//! service.commit(alice, 0, &proof, b"my-secret").await?;
//! let token_id = service.reveal(alice, b"my-secret").await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        AllocatorConfig, ClaimKey, ClaimMode, CommitRecord, SalePhase,
    };

    // Value objects
    pub use crate::domain::value_objects::{Address, Hash, TokenId, U256};

    // Domain services
    pub use crate::domain::services::{
        commit_digest, hash_sorted_pair, keccak256, probe_token_id, public_seed, token_id_seed,
        whitelist_leaf,
    };

    // Claim tracking, ledger, whitelist, batch guard
    pub use crate::domain::batch::{
        encode_transfer_from, selector, validate_batch, validate_call, TransferCall,
        TRANSFER_FROM_SELECTOR,
    };
    pub use crate::domain::claims::ClaimTracker;
    pub use crate::domain::ledger::ContributionLedger;
    pub use crate::domain::whitelist::WhitelistVerifier;

    // Ports
    pub use crate::ports::inbound::AllocatorApi;
    pub use crate::ports::outbound::{EntropySource, TokenVault, ValueTransfer};

    // Events
    pub use crate::events::AllocationEvent;

    // Errors
    pub use crate::errors::{AllocatorError, ErrorKind, PayoutError, VaultError};

    // Adapters
    pub use crate::adapters::{
        FailingTreasury, FixedEntropy, InMemoryTokenVault, InMemoryTreasury, SystemEntropy,
    };

    // Service
    pub use crate::service::{
        create_test_service, test_operator, AllocatorService, ServiceStats,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
