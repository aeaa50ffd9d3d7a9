use thiserror::Error;

/// Errors raised while rendering DDL statements.
///
/// Rendering stops at the first violation; no partial SQL is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DdlError {
    /// The column name collides with the implicit surrogate key.
    #[error("column name '{0}' is reserved for internal usage")]
    ReservedColumnName(String),
    /// The column configuration did not normalize cleanly.
    #[error("invalid configuration for column '{column}': {}", .errors.join("; "))]
    InvalidColumn { column: String, errors: Vec<String> },
    /// SQLite cannot add a UNIQUE column without rebuilding the table.
    #[error("cannot add unique column '{column}' to table '{table}'")]
    UniqueViaAlter { table: String, column: String },
    /// A NOT NULL column needs a default to backfill existing rows.
    #[error("cannot add mandatory column '{column}' to table '{table}' without a default value")]
    MandatoryWithoutDefault { table: String, column: String },
}

/// Convenience alias for rendering results.
pub type Result<T> = std::result::Result<T, DdlError>;
