//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the allocation protocol.
//! NO I/O, NO async, NO external collaborators.
//!
//! Dependencies point INWARD only: ports and adapters depend on this layer,
//! never the other way around.

pub mod batch;
pub mod claims;
pub mod entities;
pub mod ledger;
pub mod services;
pub mod value_objects;
pub mod whitelist;

pub use batch::*;
pub use claims::*;
pub use entities::*;
pub use ledger::*;
pub use services::*;
pub use value_objects::*;
pub use whitelist::*;
