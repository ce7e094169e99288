//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the allocation engine.
//! These are the interfaces between the domain and the outside world.
//!
//! - **Driving Port (Inbound)**: `AllocatorApi`
//! - **Driven Ports (Outbound)**: `TokenVault`, `ValueTransfer`, `EntropySource`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
