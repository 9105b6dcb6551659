//! In-memory store adapter.
//!
//! Backs the document store in tests and single-process embeddings. DashMap
//! gives per-entry locking, so concurrent upserts on one key serialize and a
//! stored record is always a single writer's record in full.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::repos::{DocumentRecord, DocumentsRepo, RepoError};

#[derive(Default)]
pub struct MemoryDocuments {
    records: DashMap<String, DocumentRecord>,
}

impl MemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DocumentsRepo for MemoryDocuments {
    async fn find_by_key(&self, key: &str) -> Result<Option<DocumentRecord>, RepoError> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn upsert(&self, record: DocumentRecord) -> Result<(), RepoError> {
        // Preserve the original creation time on overwrite.
        match self.records.entry(record.key.clone()) {
            dashmap::Entry::Occupied(mut occupied) => {
                let created_at = occupied.get().created_at;
                let mut record = record;
                record.created_at = created_at;
                occupied.insert(record);
            }
            dashmap::Entry::Vacant(vacant) => {
                vacant.insert(record);
            }
        }
        Ok(())
    }

    async fn delete_by_owner(&self, owner_id: &str) -> Result<u64, RepoError> {
        let before = self.records.len();
        self.records.retain(|_, record| record.owner_id != owner_id);
        Ok((before - self.records.len()) as u64)
    }
}
