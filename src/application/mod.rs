//! Application services layer.

pub mod arrangement;
pub mod documents;
pub mod error;
pub mod repos;
