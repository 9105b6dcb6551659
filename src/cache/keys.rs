//! Cache key derivation.

use sha2::{Digest, Sha256};

use crate::domain::types::NodeId;

use super::options::NormalizedOptions;

/// Length of a derived key in hex characters (128 bits).
pub const KEY_LEN: usize = 32;

/// Derive the cache key for a document.
///
/// The key is a pure function of the owner identifier, the cache version tag
/// and the normalized options: canonical forms are concatenated and hashed to
/// a fixed 128-bit hex string. The `id` option is dropped from the `get`
/// scope first so a request that names its document by path segment and one
/// that names it via the `id` option land on the same key.
pub fn derive_key(owner: &NodeId, version: &str, options: &NormalizedOptions) -> String {
    let mut keyed = options.clone();
    keyed.remove_get_field("id");

    let mut hasher = Sha256::new();
    hasher.update(owner.canonical().as_bytes());
    hasher.update(version.as_bytes());
    hasher.update(keyed.canonical_json().as_bytes());

    let digest = hasher.finalize();
    hex::encode(&digest[..KEY_LEN / 2])
}
