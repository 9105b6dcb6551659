use async_trait::async_trait;
use serde_json::Value;
use time::OffsetDateTime;

use crate::application::repos::{DocumentRecord, DocumentsRepo, RepoError};

use super::{PostgresDocuments, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct DocumentRow {
    document_key: String,
    owner_id: String,
    version: String,
    doc_type: String,
    options_snapshot: Value,
    payload: Value,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<DocumentRow> for DocumentRecord {
    fn from(row: DocumentRow) -> Self {
        Self {
            key: row.document_key,
            owner_id: row.owner_id,
            version: row.version,
            doc_type: row.doc_type,
            options_snapshot: row.options_snapshot,
            payload: row.payload,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl DocumentsRepo for PostgresDocuments {
    async fn find_by_key(&self, key: &str) -> Result<Option<DocumentRecord>, RepoError> {
        let row: Option<DocumentRow> = sqlx::query_as::<_, DocumentRow>(
            "SELECT document_key, owner_id, version, doc_type, \
             options_snapshot, payload, created_at, updated_at \
             FROM documents \
             WHERE document_key = $1",
        )
        .bind(key)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(DocumentRecord::from))
    }

    async fn upsert(&self, record: DocumentRecord) -> Result<(), RepoError> {
        // ON CONFLICT keeps the write atomic per key: concurrent writers
        // race on ordering, never on field-level interleaving.
        sqlx::query(
            "INSERT INTO documents ( \
                 document_key, owner_id, version, doc_type, \
                 options_snapshot, payload, created_at, updated_at \
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (document_key) DO UPDATE SET \
                 owner_id = EXCLUDED.owner_id, \
                 version = EXCLUDED.version, \
                 doc_type = EXCLUDED.doc_type, \
                 options_snapshot = EXCLUDED.options_snapshot, \
                 payload = EXCLUDED.payload, \
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(&record.key)
        .bind(&record.owner_id)
        .bind(&record.version)
        .bind(&record.doc_type)
        .bind(&record.options_snapshot)
        .bind(&record.payload)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete_by_owner(&self, owner_id: &str) -> Result<u64, RepoError> {
        // Walks the owner_id index, not the table.
        let result = sqlx::query("DELETE FROM documents WHERE owner_id = $1")
            .bind(owner_id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
