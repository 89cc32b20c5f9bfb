//! Postgres-backed record store
//!
//! - list: single ordered SELECT, served by `records_created_at_idx`
//! - insert: INSERT ... RETURNING, unique violations mapped to DbError

use async_trait::async_trait;
use sqlx::PgPool;

use super::store::{DbError, RecordStore};
use crate::models::{NewRecord, Record};

const RECORD_COLUMNS: &str = "id, name, external_code, category, created_at";

/// Record store over a shared connection pool
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn find_all(&self) -> Result<Vec<Record>, DbError> {
        let records = sqlx::query_as::<_, Record>(&format!(
            "SELECT {RECORD_COLUMNS} FROM records ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = records.len(), "fetched records");
        Ok(records)
    }

    async fn find_by_external_code(
        &self,
        external_code: &str,
    ) -> Result<Option<Record>, DbError> {
        let record = sqlx::query_as::<_, Record>(&format!(
            "SELECT {RECORD_COLUMNS} FROM records WHERE external_code = $1"
        ))
        .bind(external_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert(&self, record: &NewRecord) -> Result<Record, DbError> {
        let inserted = sqlx::query_as::<_, Record>(&format!(
            r#"
            INSERT INTO records (name, external_code, category)
            VALUES ($1, $2, $3)
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(record.name())
        .bind(record.external_code())
        .bind(record.category())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from_insert(e, record.external_code()))?;

        tracing::debug!(id = inserted.id, "inserted record");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};
    use crate::models::RecordDraft;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p roster-server -- --ignored

    async fn store() -> PgRecordStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        PgRecordStore::new(pool)
    }

    fn unique_code(prefix: &str) -> String {
        format!("{}-{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_lookup() {
        let store = store().await;
        let code = unique_code("lookup");
        let new = NewRecord::validate(RecordDraft::new("Ana", code.as_str(), "CS")).unwrap();

        let created = store.insert(&new).await.unwrap();
        let found = store.find_by_external_code(&code).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_insert_is_unique_violation() {
        let store = store().await;
        let code = unique_code("dup");
        let new = NewRecord::validate(RecordDraft::new("Ana", code.as_str(), "CS")).unwrap();

        store.insert(&new).await.unwrap();
        let err = store.insert(&new).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { external_code } if external_code == code));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn newest_record_listed_first() {
        let store = store().await;
        let code = unique_code("order");
        let new = NewRecord::validate(RecordDraft::new("Budi", code.as_str(), "EE")).unwrap();

        let created = store.insert(&new).await.unwrap();
        let all = store.find_all().await.unwrap();

        assert_eq!(all.first(), Some(&created));
    }
}
