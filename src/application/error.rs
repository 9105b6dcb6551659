use thiserror::Error;

use crate::{application::repos::RepoError, domain::error::DomainError, infra::error::InfraError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl AppError {
    /// Whether the error came from the storage backend.
    ///
    /// The document cache is a performance optimization; callers use this to
    /// fall back to recomputing a document instead of failing a request.
    pub fn is_storage_fault(&self) -> bool {
        matches!(self, AppError::Repo(_) | AppError::Infra(InfraError::Database { .. }))
    }
}
