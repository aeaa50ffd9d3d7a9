//! SQLite DDL rendering for normalized column configurations.

use crate::column::{ColumnDefinition, normalize};
use crate::error::{DdlError, Result};
use crate::table::TableSpec;
use crate::value::RawColumnSpec;

/// Name of the implicit surrogate key column.
pub const ID_COLUMN_NAME: &str = "id";

/// Declaration of the implicit surrogate key column.
pub const ID_COLUMN_DECLARATION: &str = "INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT";

pub fn id_column_clause() -> String {
    format!("{ID_COLUMN_NAME} {ID_COLUMN_DECLARATION}")
}

/// Render `CREATE TABLE IF NOT EXISTS` for `table_name`.
///
/// The surrogate key is always the first column. The first reserved name or
/// invalid column aborts rendering.
pub fn render_create_table<'a, I>(table_name: &str, columns: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a RawColumnSpec)>,
{
    let columns: Vec<(&str, &RawColumnSpec)> = columns.into_iter().collect();

    for (name, _) in &columns {
        ensure_not_reserved(name)?;
    }

    let mut clauses = vec![id_column_clause()];
    for (name, raw) in columns {
        let definition = checked_definition(name, raw)?;
        clauses.push(render_column_clause(name, &definition));
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {table_name} ({})",
        clauses.join(",")
    ))
}

/// Render `CREATE TABLE` for every column of `table`, in declaration order.
pub fn render_table(table: &TableSpec) -> Result<String> {
    render_create_table(
        &table.name,
        table.columns.iter().map(|(name, spec)| (name.as_str(), spec)),
    )
}

/// Render `ALTER TABLE ... ADD COLUMN` for a single column.
pub fn render_add_column(
    table_name: &str,
    column_name: &str,
    raw: &RawColumnSpec,
) -> Result<String> {
    ensure_not_reserved(column_name)?;
    let definition = checked_definition(column_name, raw)?;

    if definition.unique {
        return Err(DdlError::UniqueViaAlter {
            table: table_name.to_string(),
            column: column_name.to_string(),
        });
    }
    if definition.mandatory && definition.default.is_none() {
        return Err(DdlError::MandatoryWithoutDefault {
            table: table_name.to_string(),
            column: column_name.to_string(),
        });
    }

    Ok(format!(
        "ALTER TABLE {table_name} ADD COLUMN {}",
        render_column_clause(column_name, &definition)
    ))
}

/// Render `<name> <type> [NOT NULL] [DEFAULT '<value>'] [UNIQUE]`.
pub fn render_column_clause(name: &str, definition: &ColumnDefinition) -> String {
    let mut tokens = vec![name.to_string(), definition.affinity.to_string()];
    if definition.mandatory {
        tokens.push("NOT NULL".to_string());
    }
    if let Some(default) = &definition.default {
        tokens.push(format!("DEFAULT {}", quote_literal(&default.to_string())));
    }
    if definition.unique {
        tokens.push("UNIQUE".to_string());
    }

    tokens.join(" ").trim().to_string()
}

/// Wrap `value` in single quotes, doubling any embedded quote.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn ensure_not_reserved(column_name: &str) -> Result<()> {
    if column_name == ID_COLUMN_NAME {
        return Err(DdlError::ReservedColumnName(column_name.to_string()));
    }
    Ok(())
}

fn checked_definition(column_name: &str, raw: &RawColumnSpec) -> Result<ColumnDefinition> {
    normalize(raw)
        .into_definition()
        .map_err(|issues| DdlError::InvalidColumn {
            column: column_name.to_string(),
            errors: issues.into_iter().map(|issue| issue.message).collect(),
        })
}
