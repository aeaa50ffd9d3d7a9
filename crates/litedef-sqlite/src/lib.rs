//! SQLite connection handling and DDL execution.

pub mod connection;
pub mod error;
pub mod executor;
pub mod manager;
pub mod options;
pub mod queries;

pub use connection::{DB_FILE_MUST_EXIST, connect_to, connect_with_options, database_exists};
pub use error::{Result, SqliteError};
pub use executor::{DdlExecutor, SqliteExecutor};
pub use manager::SchemaManager;
pub use options::ConnectOptions;
pub use queries::{ColumnInfo, list_columns};
