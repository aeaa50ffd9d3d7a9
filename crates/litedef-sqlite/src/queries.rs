use sqlx::SqlitePool;

use crate::error::Result;

/// Column metadata as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    /// Default expression as stored by SQLite, quotes included.
    pub default_value: Option<String>,
    pub primary_key: bool,
}

pub async fn list_columns(pool: &SqlitePool, table: &str) -> Result<Vec<ColumnInfo>> {
    let rows = sqlx::query_as::<_, (i64, String, String, i64, Option<String>, i64)>(
        "select cid, name, type, \"notnull\", dflt_value, pk from pragma_table_info(?) order by cid",
    )
    .bind(table)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(_, name, declared_type, not_null, default_value, pk)| ColumnInfo {
                name,
                declared_type,
                not_null: not_null != 0,
                default_value,
                primary_key: pk != 0,
            },
        )
        .collect())
}
