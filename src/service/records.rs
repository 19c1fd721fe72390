//! Gateway operations against PostgreSQL. Every call takes the pool it runs on.

use crate::error::StoreError;
use crate::record::{NewRecord, Record};
use crate::sql::RecordQueries;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct RecordService;

impl RecordService {
    /// Every row, in whatever order the backend returns them.
    pub async fn list(pool: &PgPool, queries: &RecordQueries) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(sql = %queries.select_all, "query");
        let rows = sqlx::query_as::<_, Record>(&queries.select_all)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Insert one row stamped with `added`. Returns the rows the backend reports back.
    pub async fn insert(
        pool: &PgPool,
        queries: &RecordQueries,
        fields: &NewRecord,
        added: DateTime<Utc>,
    ) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(sql = %queries.insert, %added, "query");
        let rows = sqlx::query_as::<_, Record>(&queries.insert)
            .bind(&fields.first)
            .bind(&fields.last)
            .bind(&fields.email)
            .bind(&fields.phone)
            .bind(&fields.location)
            .bind(added)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Overwrite the text fields of the row keyed by `id`. No existence check: an unknown id yields no rows.
    pub async fn update(
        pool: &PgPool,
        queries: &RecordQueries,
        id: i64,
        fields: &NewRecord,
    ) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(sql = %queries.update, id, "query");
        let rows = sqlx::query_as::<_, Record>(&queries.update)
            .bind(&fields.first)
            .bind(&fields.last)
            .bind(&fields.email)
            .bind(&fields.phone)
            .bind(&fields.location)
            .bind(id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Delete the row keyed by `id`. Returns rows affected (0 or 1).
    pub async fn delete(pool: &PgPool, queries: &RecordQueries, id: i64) -> Result<u64, StoreError> {
        tracing::debug!(sql = %queries.delete, id, "query");
        let result = sqlx::query(&queries.delete).bind(id).execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn ping(pool: &PgPool) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(pool).await?;
        Ok(())
    }
}
