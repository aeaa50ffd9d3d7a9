use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::Result;

/// Trait implemented by backends that can run DDL statements.
#[async_trait]
pub trait DdlExecutor {
    /// Returns the engine identifier (e.g. `sqlite`).
    fn engine(&self) -> &'static str;

    /// Execute a single statement.
    async fn execute(&self, sql: &str) -> Result<()>;
}

/// Executor backed by a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    pool: SqlitePool,
}

impl SqliteExecutor {
    /// Create a new executor using a pre-configured pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DdlExecutor for SqliteExecutor {
    fn engine(&self) -> &'static str {
        "sqlite"
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }
}
