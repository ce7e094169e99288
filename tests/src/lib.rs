//! # FairDrop Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── util/             # Shared fixtures (whitelist tree builder)
//! │
//! ├── integration/      # End-to-end allocation flows
//! │   └── allocation_flows.rs
//! │
//! └── exploits/         # Attack simulations against the engine
//!     └── allocation_attacks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p fairdrop-tests
//!
//! # By category
//! cargo test -p fairdrop-tests integration::
//! cargo test -p fairdrop-tests exploits::
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
pub mod util;
