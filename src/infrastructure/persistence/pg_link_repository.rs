//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::StorageError;

/// PostgreSQL repository for short links.
///
/// Uniqueness is enforced by the `short_links_short_code_key` constraint;
/// inserts go through `ON CONFLICT DO NOTHING` so a duplicate code is an
/// ordinary outcome rather than a database error.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    short_code: String,
    original_url: String,
    click_count: i64,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(
            row.id,
            row.short_code,
            row.original_url,
            row.click_count,
            row.created_at,
        )
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StorageError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, short_code, original_url, click_count, created_at
            FROM short_links
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn try_insert(&self, new_link: NewShortLink) -> Result<InsertOutcome, StorageError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (short_code, original_url)
            VALUES ($1, $2)
            ON CONFLICT (short_code) DO NOTHING
            RETURNING id, short_code, original_url, click_count, created_at
            "#,
        )
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(match row {
            Some(row) => InsertOutcome::Inserted(row.into()),
            None => InsertOutcome::AlreadyExists,
        })
    }

    async fn increment_click_count(&self, code: &str) -> Result<(), StorageError> {
        sqlx::query("UPDATE short_links SET click_count = click_count + 1 WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn count(&self) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn total_clicks(&self) -> Result<i64, StorageError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(click_count), 0)::BIGINT FROM short_links")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(total)
    }
}
