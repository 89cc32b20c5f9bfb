//! Record Store Gateway - typed access to the backing store
//!
//! One implementation per backend:
//! - `PgRecordStore` over a sqlx Postgres pool
//! - `MemoryRecordStore` for tests and throwaway dev servers
//!
//! Both enforce `external_code` uniqueness inside `insert` and report a
//! violation as `DbError::UniqueViolation`.

use async_trait::async_trait;

use crate::models::{NewRecord, Record};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unique constraint violated: external code '{external_code}'")]
    UniqueViolation { external_code: String },
}

impl DbError {
    /// Map an insert failure, recognising the store's unique-constraint error.
    pub(crate) fn from_insert(err: sqlx::Error, external_code: &str) -> Self {
        let is_unique = matches!(
            &err,
            sqlx::Error::Database(db) if db.is_unique_violation()
        );

        if is_unique {
            Self::UniqueViolation {
                external_code: external_code.to_owned(),
            }
        } else {
            Self::Sqlx(err)
        }
    }
}

/// Trait for record persistence (testable)
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name reported by the health endpoint.
    fn kind(&self) -> &'static str;

    /// All records, newest `created_at` first.
    async fn find_all(&self) -> Result<Vec<Record>, DbError>;

    /// Look up a record by its unique external code.
    async fn find_by_external_code(&self, external_code: &str)
        -> Result<Option<Record>, DbError>;

    /// Insert a record; the store assigns `id` and `created_at`.
    async fn insert(&self, record: &NewRecord) -> Result<Record, DbError>;
}
