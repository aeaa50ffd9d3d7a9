use std::path::Path;

use litedef_core::{RawColumnSpec, TableSpec, render_add_column, render_table};

use crate::connection::connect_to;
use crate::error::Result;
use crate::executor::{DdlExecutor, SqliteExecutor};
use crate::queries::{ColumnInfo, list_columns};

/// Renders table definitions and applies them through an executor.
///
/// Statements are only executed after rendering succeeded, so a rejected
/// column configuration never reaches the database.
#[derive(Debug, Clone)]
pub struct SchemaManager<E> {
    executor: E,
}

impl<E> SchemaManager<E>
where
    E: DdlExecutor + Sync,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Create `table` (if missing) and return the executed statement.
    pub async fn create_table(&self, table: &TableSpec) -> Result<String> {
        let sql = render_table(table)?;
        tracing::debug!(event = "ddl_rendered", table = %table.name, sql = %sql);

        self.executor.execute(&sql).await?;
        tracing::info!(
            event = "ddl_executed",
            engine = self.executor.engine(),
            table = %table.name,
            columns = table.columns.len()
        );
        Ok(sql)
    }

    /// Add a single column to an existing table and return the executed statement.
    pub async fn add_column(
        &self,
        table: &str,
        column: &str,
        spec: &RawColumnSpec,
    ) -> Result<String> {
        let sql = render_add_column(table, column, spec)?;
        tracing::debug!(event = "ddl_rendered", table = %table, sql = %sql);

        self.executor.execute(&sql).await?;
        tracing::info!(
            event = "ddl_executed",
            engine = self.executor.engine(),
            table = %table,
            column = %column
        );
        Ok(sql)
    }
}

impl SchemaManager<SqliteExecutor> {
    /// Open the database at `path` and wrap it in a manager.
    pub async fn open(path: impl AsRef<Path>, must_exist: bool) -> Result<Self> {
        let pool = connect_to(path, must_exist).await?;
        Ok(Self::new(SqliteExecutor::new(pool)))
    }

    pub async fn list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        list_columns(self.executor.pool(), table).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use litedef_core::DdlError;

    use super::*;
    use crate::error::SqliteError;

    #[derive(Default)]
    struct RecordingExecutor {
        statements: Mutex<Vec<String>>,
    }

    impl RecordingExecutor {
        fn statements(&self) -> Vec<String> {
            self.statements.lock().expect("lock statements").clone()
        }
    }

    #[async_trait]
    impl DdlExecutor for RecordingExecutor {
        fn engine(&self) -> &'static str {
            "recording"
        }

        async fn execute(&self, sql: &str) -> Result<()> {
            self.statements
                .lock()
                .expect("lock statements")
                .push(sql.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn executes_rendered_create_table() {
        let manager = SchemaManager::new(RecordingExecutor::default());
        let table = TableSpec::new("notes").with_column(
            "body",
            RawColumnSpec::new().with("type", "text").with("mandatory", true),
        );

        let sql = manager.create_table(&table).await.expect("create table");

        assert_eq!(manager.executor().statements(), vec![sql.clone()]);
        assert!(sql.ends_with(",body TEXT NOT NULL)"));
    }

    #[tokio::test]
    async fn rejected_column_is_never_executed() {
        let manager = SchemaManager::new(RecordingExecutor::default());
        let spec = RawColumnSpec::new().with("unique", true);

        let err = manager
            .add_column("notes", "slug", &spec)
            .await
            .expect_err("unique via alter");

        assert!(matches!(
            err,
            SqliteError::Ddl(DdlError::UniqueViaAlter { .. })
        ));
        assert!(manager.executor().statements().is_empty());
    }
}
