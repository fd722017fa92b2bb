//! PostgreSQL implementation of the redirect repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::RedirectRecord;
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct RedirectRow {
    token: String,
    target_url: String,
    created_at: i64,
}

impl From<RedirectRow> for RedirectRecord {
    fn from(row: RedirectRow) -> Self {
        RedirectRecord::new(row.token, row.target_url, row.created_at)
    }
}

/// PostgreSQL repository for redirect records.
///
/// Token uniqueness is enforced by the `redirects` primary key; inserts use
/// `ON CONFLICT DO NOTHING` so a lost race surfaces as `Ok(false)` rather
/// than a constraint error.
pub struct PgRedirectRepository {
    pool: Arc<PgPool>,
}

impl PgRedirectRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RedirectRepository for PgRedirectRepository {
    async fn exists(&self, token: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM redirects WHERE token = $1)")
                .bind(token)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn insert_if_absent(&self, token: &str, target_url: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO redirects (token, target_url)
            VALUES ($1, $2)
            ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(token)
        .bind(target_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get(&self, token: &str) -> Result<Option<RedirectRecord>, AppError> {
        let row = sqlx::query_as::<_, RedirectRow>(
            r#"
            SELECT token, target_url, created_at
            FROM redirects
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(RedirectRecord::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM redirects")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
