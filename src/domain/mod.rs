//! Domain layer types and invariants.

pub mod arrangement;
pub mod error;
pub mod rivers;
pub mod tiles;
pub mod types;
