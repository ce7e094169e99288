//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the engine's driven ports: the token vault,
//! the payout channel, and the entropy sources. A production deployment
//! substitutes ledger-backed adapters behind the same traits.

pub mod entropy;
pub mod token_vault;
pub mod treasury;

pub use entropy::*;
pub use token_vault::*;
pub use treasury::*;
