mod settings;
mod spec_file;

pub use settings::{LogFormat, Settings, load_settings};
pub use spec_file::load_table_spec;

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("config file not found: {0}")]
    Missing(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
