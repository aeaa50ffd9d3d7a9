use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::{Result, SqliteError};
use crate::options::ConnectOptions;

/// Pass as `must_exist` to refuse creating a new database file.
pub const DB_FILE_MUST_EXIST: bool = true;

/// Check whether the database file exists.
pub fn database_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Open a SQLite database file.
///
/// When `must_exist` is set and the file is missing this fails without
/// touching the filesystem; otherwise the file is created on demand.
pub async fn connect_to(path: impl AsRef<Path>, must_exist: bool) -> Result<SqlitePool> {
    let opts = ConnectOptions {
        must_exist,
        ..ConnectOptions::default()
    };
    connect_with_options(path, &opts).await
}

/// Open a SQLite database file with caller-provided options.
pub async fn connect_with_options(
    path: impl AsRef<Path>,
    opts: &ConnectOptions,
) -> Result<SqlitePool> {
    let path = path.as_ref();
    if opts.must_exist && !database_exists(path) {
        return Err(SqliteError::MissingDatabase(path.to_path_buf()));
    }

    let connect = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(!opts.must_exist);

    let pool = SqlitePoolOptions::new()
        .max_connections(opts.max_connections)
        .acquire_timeout(opts.acquire_timeout)
        .connect_with(connect)
        .await?;

    tracing::info!(
        event = "connection_opened",
        path = %path.display(),
        must_exist = opts.must_exist
    );

    Ok(pool)
}
