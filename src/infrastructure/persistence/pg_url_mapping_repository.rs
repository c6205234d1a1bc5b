//! PostgreSQL implementation of the mapping store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, StoreSummary, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::StoreError;

/// PostgreSQL repository for URL mappings.
///
/// Short code uniqueness comes from the `url_mappings_short_code_key`
/// constraint; visit counting is a single `UPDATE ... SET total_visits = total_visits + 1`.
pub struct PgUrlMappingRepository {
    pool: Arc<PgPool>,
}

impl PgUrlMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlMappingRow {
    id: i64,
    short_code: String,
    long_url: String,
    owner: String,
    created_at: DateTime<Utc>,
    total_visits: i64,
}

impl From<UrlMappingRow> for UrlMapping {
    fn from(r: UrlMappingRow) -> Self {
        UrlMapping::new(
            r.id,
            r.short_code,
            r.long_url,
            r.owner,
            r.created_at,
            r.total_visits,
        )
    }
}

#[async_trait]
impl UrlMappingRepository for PgUrlMappingRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            SELECT id, short_code, long_url, owner, created_at, total_visits
            FROM url_mappings
            WHERE long_url = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            SELECT id, short_code, long_url, owner, created_at, total_visits
            FROM url_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StoreError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            INSERT INTO url_mappings (short_code, long_url, owner, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, short_code, long_url, owner, created_at, total_visits
            "#,
        )
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.long_url)
        .bind(&new_mapping.owner)
        .bind(new_mapping.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn increment_visits(&self, short_code: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE url_mappings
            SET total_visits = total_visits + 1
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<UrlMapping>, StoreError> {
        let rows = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            SELECT id, short_code, long_url, owner, created_at, total_visits
            FROM url_mappings
            WHERE owner = $1
            ORDER BY id
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UrlMapping::from).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn summary(&self) -> Result<StoreSummary, StoreError> {
        let (mappings, total_visits): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*)::BIGINT, COALESCE(SUM(total_visits), 0)::BIGINT
            FROM url_mappings
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(StoreSummary {
            mappings,
            total_visits,
        })
    }
}
