//! Record store gateway: the seam between handlers and the backend.

use crate::error::StoreError;
use crate::record::{ListOutcome, NewRecord, Record};
use crate::service::RecordService;
use crate::sql::RecordQueries;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// The four table operations plus a liveness probe. Implementations hold their own handle;
/// nothing here is global.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every stored record, backend order.
    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Persist a new record stamped with the current time; returns the stored row(s).
    async fn insert(&self, fields: &NewRecord) -> Result<Vec<Record>, StoreError>;

    /// Replace the text fields of the record keyed by `id`. Zero rows when `id` is unknown.
    async fn update(&self, id: i64, fields: &NewRecord) -> Result<Vec<Record>, StoreError>;

    /// Remove the record keyed by `id`; returns rows removed.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// `fetch_all`, with an empty table reported as the "no data" marker.
    async fn list(&self) -> Result<ListOutcome, StoreError> {
        Ok(ListOutcome::from(self.fetch_all().await?))
    }
}

/// PostgreSQL-backed store. The pool manages concurrent access.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
    queries: RecordQueries,
}

impl PgRecordStore {
    pub fn new(pool: PgPool, schema: &str, table: &str) -> Self {
        Self {
            pool,
            queries: RecordQueries::new(schema, table),
        }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        RecordService::list(&self.pool, &self.queries).await
    }

    async fn insert(&self, fields: &NewRecord) -> Result<Vec<Record>, StoreError> {
        RecordService::insert(&self.pool, &self.queries, fields, Utc::now()).await
    }

    async fn update(&self, id: i64, fields: &NewRecord) -> Result<Vec<Record>, StoreError> {
        RecordService::update(&self.pool, &self.queries, id, fields).await
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        RecordService::delete(&self.pool, &self.queries, id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        RecordService::ping(&self.pool).await
    }
}

#[derive(Default)]
struct MemoryTable {
    rows: Vec<Record>,
    last_id: i64,
}

/// In-process store with serial ids. `set_failing(true)` makes every call fail without
/// touching the rows, standing in for a broken backend.
#[derive(Default)]
pub struct MemoryRecordStore {
    table: Mutex<MemoryTable>,
    failing: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn table(&self) -> Result<MutexGuard<'_, MemoryTable>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated backend fault".into()));
        }
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("memory table poisoned".into()))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.table()?.rows.clone())
    }

    async fn insert(&self, fields: &NewRecord) -> Result<Vec<Record>, StoreError> {
        let mut table = self.table()?;
        table.last_id += 1;
        let record = Record::from_fields(table.last_id, fields.clone(), Utc::now());
        table.rows.push(record.clone());
        Ok(vec![record])
    }

    async fn update(&self, id: i64, fields: &NewRecord) -> Result<Vec<Record>, StoreError> {
        let mut table = self.table()?;
        Ok(table
            .rows
            .iter_mut()
            .filter(|r| r.id == id)
            .map(|r| {
                r.apply(fields);
                r.clone()
            })
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let mut table = self.table()?;
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        Ok((before - table.rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.table().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(first: &str) -> NewRecord {
        NewRecord {
            first: first.into(),
            last: "B".into(),
            email: "a@b.com".into(),
            phone: "555".into(),
            location: "X".into(),
        }
    }

    #[tokio::test]
    async fn insert_then_list_contains_exactly_that_record() {
        let store = MemoryRecordStore::new();
        let before = Utc::now();
        let created = store.insert(&fields("A")).await.unwrap();
        assert_eq!(created.len(), 1);
        let created = &created[0];
        assert_eq!(created.id, 1);
        assert!(created.added >= before);

        let rows = store.fetch_all().await.unwrap();
        assert_eq!(rows.iter().filter(|r| r.first == "A").count(), 1);
        assert_eq!(&rows[0], created);
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = MemoryRecordStore::new();
        let first = store.insert(&fields("A")).await.unwrap()[0].id;
        store.delete(first).await.unwrap();
        let second = store.insert(&fields("B")).await.unwrap()[0].id;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn list_on_empty_table_is_no_data_marker() {
        let store = MemoryRecordStore::new();
        assert!(matches!(store.list().await.unwrap(), ListOutcome::NoData(_)));
        store.insert(&fields("A")).await.unwrap();
        store.insert(&fields("B")).await.unwrap();
        match store.list().await.unwrap() {
            ListOutcome::Records(rows) => assert_eq!(rows.len(), 2),
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_empty_and_creates_nothing() {
        let store = MemoryRecordStore::new();
        let rows = store.update(42, &fields("A")).await.unwrap();
        assert!(rows.is_empty());
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_timestamp() {
        let store = MemoryRecordStore::new();
        let created = store.insert(&fields("A")).await.unwrap().remove(0);
        let updated = store.update(created.id, &fields("A2")).await.unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].first, "A2");
        assert_eq!(updated[0].added, created.added);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryRecordStore::new();
        let id = store.insert(&fields("A")).await.unwrap()[0].id;
        assert_eq!(store.delete(id).await.unwrap(), 1);
        assert_eq!(store.delete(id).await.unwrap(), 0);
        assert_eq!(store.delete(999).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failing_store_changes_nothing() {
        let store = MemoryRecordStore::new();
        store.insert(&fields("A")).await.unwrap();
        store.set_failing(true);
        assert!(store.insert(&fields("B")).await.is_err());
        assert!(store.update(1, &fields("C")).await.is_err());
        assert!(store.delete(1).await.is_err());
        assert!(store.list().await.is_err());
        assert!(store.ping().await.is_err());
        store.set_failing(false);
        let rows = store.fetch_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first, "A");
    }
}
