//! Runs rendered query text against a SQLite pool.

use std::fmt;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row};
use tracing::{debug, info, warn};

use crate::config::ExecutorConfig;
use crate::error::{ExecError, Result};

/// Executes SQL text produced by the builders.
///
/// Statements are sent as-is; nothing is bound. Anything implementing
/// [`Display`](fmt::Display) is accepted, so a builder stage can be
/// passed directly instead of calling `build()` first.
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    pool: SqlitePool,
}

fn logged<T>(sql: &str, result: std::result::Result<T, sqlx::Error>) -> Result<T> {
    result.map_err(|e| {
        warn!(sql = %sql, error = %e, "Query failed");
        ExecError::Database(e)
    })
}

impl SqliteExecutor {
    /// Opens a pool for `config`.
    pub async fn connect(config: &ExecutorConfig) -> Result<Self> {
        config.validate()?;
        info!(
            url = %config.database_url,
            max_connections = config.max_connections,
            "Opening SQLite pool"
        );
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Runs a query and maps every row.
    pub async fn fetch_all<R>(&self, sql: &(impl fmt::Display + ?Sized)) -> Result<Vec<R>>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = sql.to_string();
        debug!(sql = %sql, "Fetching rows");
        let rows = sqlx::query_as::<_, R>(&sql).fetch_all(&self.pool).await;
        logged(&sql, rows)
    }

    /// Runs a query and maps the first row, if any.
    pub async fn fetch_optional<R>(&self, sql: &(impl fmt::Display + ?Sized)) -> Result<Option<R>>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = sql.to_string();
        debug!(sql = %sql, "Fetching optional row");
        let row = sqlx::query_as::<_, R>(&sql)
            .fetch_optional(&self.pool)
            .await;
        logged(&sql, row)
    }

    /// Runs a query and maps the first row.
    ///
    /// Returns [`ExecError::NotFound`] when the query yields no rows.
    pub async fn fetch_one<R>(&self, sql: &(impl fmt::Display + ?Sized)) -> Result<R>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        self.fetch_optional(sql).await?.ok_or(ExecError::NotFound)
    }

    /// Runs a query whose first column is an integer, e.g. `COUNT(*)`, and
    /// returns that value from the first row.
    pub async fn fetch_count(&self, sql: &(impl fmt::Display + ?Sized)) -> Result<i64> {
        let sql = sql.to_string();
        debug!(sql = %sql, "Fetching count");
        let row = logged(&sql, sqlx::query(&sql).fetch_optional(&self.pool).await)?
            .ok_or(ExecError::NotFound)?;
        logged(&sql, row.try_get::<i64, _>(0))
    }

    /// Executes a statement that returns no rows and reports the number
    /// of rows affected.
    pub async fn execute(&self, sql: &(impl fmt::Display + ?Sized)) -> Result<u64> {
        let sql = sql.to_string();
        debug!(sql = %sql, "Executing SQL");
        let done = logged(&sql, sqlx::query(&sql).execute(&self.pool).await)?;
        Ok(done.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_executor() -> SqliteExecutor {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteExecutor::from_pool(pool)
    }

    #[tokio::test]
    async fn test_execute_reports_rows_affected() {
        let executor = create_test_executor().await;
        executor
            .execute("CREATE TABLE \"Tag\" (\"Id\" INTEGER PRIMARY KEY)")
            .await
            .unwrap();
        let inserted = executor
            .execute("INSERT INTO \"Tag\" (\"Id\") VALUES (1), (2)")
            .await
            .unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(
            executor
                .fetch_count("SELECT COUNT(*) FROM \"Tag\"")
                .await
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_invalid_sql_is_database_error() {
        let executor = create_test_executor().await;
        let err = executor.execute("SELEC 1").await.unwrap_err();
        assert!(matches!(err, ExecError::Database(_)));
    }

    #[tokio::test]
    async fn test_fetch_count_without_rows() {
        let executor = create_test_executor().await;
        executor
            .execute("CREATE TABLE \"Tag\" (\"Id\" INTEGER PRIMARY KEY)")
            .await
            .unwrap();
        let err = executor
            .fetch_count("SELECT \"Id\" FROM \"Tag\"")
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::NotFound));
    }
}
