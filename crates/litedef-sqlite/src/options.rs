use std::time::Duration;

/// Options that control how a database file is opened.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Fail instead of creating the file when it does not exist.
    pub must_exist: bool,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            must_exist: false,
            // SQLite serializes writers; one connection keeps DDL ordered.
            max_connections: 1,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}
