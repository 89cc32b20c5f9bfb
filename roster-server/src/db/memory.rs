//! In-memory record store
//!
//! Process-local and lost on restart. Holds the same contract as the
//! Postgres store: store-assigned ids and timestamps, newest-first listing,
//! and a unique external code checked atomically with the insert.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::store::{DbError, RecordStore};
use crate::models::{NewRecord, Record};

#[derive(Default)]
struct Inner {
    records: Vec<Record>,
    last_id: i64,
}

/// Record store kept in process memory
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self) -> Result<Vec<Record>, DbError> {
        let mut records = self.inner.read().await.records.clone();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn find_by_external_code(
        &self,
        external_code: &str,
    ) -> Result<Option<Record>, DbError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .find(|r| r.external_code == external_code)
            .cloned())
    }

    async fn insert(&self, record: &NewRecord) -> Result<Record, DbError> {
        let mut inner = self.inner.write().await;

        if inner
            .records
            .iter()
            .any(|r| r.external_code == record.external_code())
        {
            return Err(DbError::UniqueViolation {
                external_code: record.external_code().to_owned(),
            });
        }

        inner.last_id += 1;
        let stored = Record {
            id: inner.last_id,
            name: record.name().to_owned(),
            external_code: record.external_code().to_owned(),
            category: record.category().to_owned(),
            created_at: Utc::now(),
        };
        inner.records.push(stored.clone());

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordDraft;

    fn new_record(name: &str, code: &str) -> NewRecord {
        NewRecord::validate(RecordDraft::new(name, code, "CS")).unwrap()
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = MemoryRecordStore::new();
        let a = store.insert(&new_record("Ana", "X1")).await.unwrap();
        let b = store.insert(&new_record("Budi", "X2")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(b.created_at >= a.created_at);
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryRecordStore::new();
        for (name, code) in [("Ana", "X1"), ("Budi", "X2"), ("Citra", "X3")] {
            store.insert(&new_record(name, code)).await.unwrap();
        }

        let codes: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.external_code)
            .collect();

        assert_eq!(codes, ["X3", "X2", "X1"]);
    }

    #[tokio::test]
    async fn rejects_duplicate_code() {
        let store = MemoryRecordStore::new();
        store.insert(&new_record("Ana", "X1")).await.unwrap();

        let err = store.insert(&new_record("Other", "X1")).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn lookup_misses_unknown_code() {
        let store = MemoryRecordStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.find_by_external_code("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_duplicate_inserts_keep_one() {
        let store = std::sync::Arc::new(MemoryRecordStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(&new_record(&format!("Student {i}"), "SAME"))
                        .await
                })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            if handle.await.expect("task panicked").is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(store.len().await, 1);
    }
}
