//! Riverbed: themed article rivers backed by a persistent, versioned
//! document cache.
//!
//! The crate is layered bottom-up:
//!
//! - [`domain`] — identifiers, tiles, arrangements, vault filters.
//! - [`cache`] — pure cache primitives: option normalization, key
//!   derivation, payload validation.
//! - [`application`] — the [`application::documents::DocumentStore`]
//!   service and arrangement assembly over repository traits.
//! - [`infra`] — Postgres and in-memory repository adapters, telemetry.
//! - [`config`] — typed settings with file and environment sources.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
