use std::path::PathBuf;

use litedef_core::DdlError;
use thiserror::Error;

/// Errors raised while talking to a SQLite database.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// The database file was required to exist but does not.
    #[error("'{}' does not exist", .0.display())]
    MissingDatabase(PathBuf),
    /// The statement could not be rendered; nothing was executed.
    #[error(transparent)]
    Ddl(#[from] DdlError),
    /// Errors returned by `sqlx` when connecting or executing.
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Convenience alias for SQLite results.
pub type Result<T> = std::result::Result<T, SqliteError>;
