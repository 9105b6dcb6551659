//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// One persisted cache entry.
///
/// `key` is the only lookup field; `owner_id` exists for bulk invalidation
/// and `doc_type` for operational filtering. `options_snapshot` records the
/// normalized options the entry was stored under, for diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub key: String,
    pub owner_id: String,
    pub version: String,
    pub doc_type: String,
    pub options_snapshot: Value,
    pub payload: Value,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Key/value persistence boundary for cached documents.
///
/// Implementations must make `upsert` atomic per key: two concurrent writers
/// targeting the same key may race on which record wins, but a stored record
/// is always all of one writer's fields. `find_by_key` and `upsert` complete
/// in time proportional to a single-record operation; `delete_by_owner` may
/// scan an index on the owner column.
#[async_trait]
pub trait DocumentsRepo: Send + Sync {
    /// Point lookup by exact key. Absence is `Ok(None)`, not an error.
    async fn find_by_key(&self, key: &str) -> Result<Option<DocumentRecord>, RepoError>;

    /// Insert the record, or fully replace an existing record with the same
    /// key. Never a partial merge.
    async fn upsert(&self, record: DocumentRecord) -> Result<(), RepoError>;

    /// Remove every record whose owner matches, across all versions and
    /// option variations. Returns the number of records removed.
    async fn delete_by_owner(&self, owner_id: &str) -> Result<u64, RepoError>;
}
