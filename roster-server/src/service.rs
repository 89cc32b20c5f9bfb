//! Record use-case service.
//!
//! # Responsibility
//! - List records newest first.
//! - Create a record: presence check, then external-code lookup, then insert.
//!
//! # Invariants
//! - A draft that fails validation never touches the store.
//! - A duplicate external code never reaches `insert` via the fast path, and
//!   a store-level unique violation on insert surfaces as the same
//!   `ServiceError::Conflict`.
//! - Nothing is retried.

use std::sync::Arc;

use crate::db::{DbError, RecordStore};
use crate::models::{NewRecord, Record, RecordDraft, ValidationError};

/// Errors surfaced by the record service
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("external code '{external_code}' is already registered")]
    Conflict { external_code: String },

    #[error("store error: {0}")]
    Store(#[source] DbError),
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::UniqueViolation { external_code } => Self::Conflict { external_code },
            other => Self::Store(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case service over a shared record store.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    /// Creates a service using the provided store handle.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Backend kind of the underlying store.
    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    /// All records, most recent `created_at` first.
    pub async fn list(&self) -> ServiceResult<Vec<Record>> {
        Ok(self.store.find_all().await?)
    }

    /// Validate and persist a new record.
    ///
    /// # Contract
    /// - Missing/empty field: `ServiceError::Validation`, no store access.
    /// - Existing external code: `ServiceError::Conflict`, no insert.
    /// - Returns the stored record with `id` and `created_at` populated.
    pub async fn create(&self, draft: RecordDraft) -> ServiceResult<Record> {
        let new = NewRecord::validate(draft)?;

        if self
            .store
            .find_by_external_code(new.external_code())
            .await?
            .is_some()
        {
            tracing::warn!(external_code = new.external_code(), "duplicate external code");
            return Err(ServiceError::Conflict {
                external_code: new.external_code().to_owned(),
            });
        }

        let record = self.store.insert(&new).await.inspect_err(|e| {
            if let DbError::UniqueViolation { external_code } = e {
                tracing::warn!(%external_code, "external code registered concurrently");
            }
        })?;

        tracing::info!(id = record.id, external_code = %record.external_code, "record created");
        Ok(record)
    }
}
