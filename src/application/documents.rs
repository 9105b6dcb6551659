//! The document store service.
//!
//! Front door of the cache: callers hand over an identifier, the request
//! options and (on writes) an assembled document; the service normalizes,
//! validates, derives the key and drives the store adapter. Reads return a
//! [`CachedDocument`] wrapper so callers can tell cached documents from
//! freshly computed ones without inspecting the payload.

use std::sync::Arc;

use metrics::counter;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{
    application::{
        error::AppError,
        repos::{DocumentRecord, DocumentsRepo},
    },
    cache::{RequestOptions, derive_key, validate},
    domain::types::NodeId,
};

/// Cache version tag used when none is configured. Bump to orphan every
/// previously stored document at once.
pub const DEFAULT_VERSION: &str = "v2";

/// A document returned from the read path.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedDocument {
    pub document: Map<String, Value>,
    pub from_cache: bool,
}

/// Versioned document cache over a [`DocumentsRepo`].
#[derive(Clone)]
pub struct DocumentStore {
    repo: Arc<dyn DocumentsRepo>,
    version: String,
}

impl DocumentStore {
    pub fn new(repo: Arc<dyn DocumentsRepo>) -> Self {
        Self::with_version(repo, DEFAULT_VERSION)
    }

    pub fn with_version(repo: Arc<dyn DocumentsRepo>, version: impl Into<String>) -> Self {
        Self {
            repo,
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Look up the cached document for an identifier and option set.
    ///
    /// Misses are `Ok(None)`; storage faults surface as `Err` so the caller
    /// can recompute instead of serving nothing.
    pub async fn get(
        &self,
        owner: &NodeId,
        options: &RequestOptions,
    ) -> Result<Option<CachedDocument>, AppError> {
        let normalized = options.normalize();
        let key = derive_key(owner, &self.version, &normalized);

        let Some(record) = self.repo.find_by_key(&key).await? else {
            counter!("riverbed_document_cache_miss_total").increment(1);
            debug!(target: "riverbed::documents", %owner, %key, "document cache miss");
            return Ok(None);
        };

        let Value::Object(document) = record.payload else {
            // A non-object payload can only come from outside writers; treat
            // it as a miss rather than failing the request.
            warn!(target: "riverbed::documents", %owner, %key, "stored payload is not a JSON object");
            counter!("riverbed_document_cache_miss_total").increment(1);
            return Ok(None);
        };

        counter!("riverbed_document_cache_hit_total").increment(1);
        debug!(target: "riverbed::documents", %owner, %key, "document cache hit");

        Ok(Some(CachedDocument {
            document,
            from_cache: true,
        }))
    }

    /// Store a document for an identifier and option set.
    ///
    /// Returns `Ok(false)` when validation rejects the write (non-numeric
    /// identifier, id mismatch, missing type tag); nothing is stored and any
    /// existing record for the key is left untouched. Returns `Ok(true)` on a
    /// successful insert or overwrite.
    pub async fn set(
        &self,
        owner: &NodeId,
        options: &RequestOptions,
        document: Map<String, Value>,
    ) -> Result<bool, AppError> {
        let normalized = options.normalize();

        if !validate(owner, &document) {
            counter!("riverbed_document_cache_skip_total").increment(1);
            debug!(target: "riverbed::documents", %owner, "document failed validation, write skipped");
            return Ok(false);
        }

        let key = derive_key(owner, &self.version, &normalized);
        let doc_type = document
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let now = OffsetDateTime::now_utc();

        let record = DocumentRecord {
            key: key.clone(),
            owner_id: owner.canonical(),
            version: self.version.clone(),
            doc_type,
            options_snapshot: normalized.to_value(),
            payload: Value::Object(document),
            created_at: now,
            updated_at: now,
        };

        self.repo.upsert(record).await?;
        counter!("riverbed_document_cache_store_total").increment(1);
        debug!(target: "riverbed::documents", %owner, %key, "document stored");

        Ok(true)
    }

    /// Drop every cached document for an identifier, across all option and
    /// version variations. Returns the number of records removed.
    pub async fn clear_by_owner(&self, owner: &NodeId) -> Result<u64, AppError> {
        let removed = self.repo.delete_by_owner(&owner.canonical()).await?;
        counter!("riverbed_document_cache_invalidate_total").increment(removed);
        debug!(target: "riverbed::documents", %owner, removed, "owner invalidated");
        Ok(removed)
    }
}
