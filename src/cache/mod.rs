//! Document cache primitives.
//!
//! Pure building blocks of the document store: request-option normalization,
//! cache-key derivation, and payload validation. None of these touch storage;
//! the service in [`crate::application::documents`] wires them to a
//! [`crate::application::repos::DocumentsRepo`].

mod keys;
mod options;
mod validate;

pub use keys::{KEY_LEN, derive_key};
pub use options::{GET_SCOPE, NormalizedOptions, RequestOptions, Scope};
pub use validate::validate;
