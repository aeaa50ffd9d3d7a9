use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigResult};

/// Settings file picked up from the working directory when present.
pub const DEFAULT_SETTINGS_FILE: &str = "litedef.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite file that statements are applied to.
    pub database: Option<PathBuf>,
    /// Refuse to create the database file when it is missing.
    pub require_existing: bool,
    pub log_format: LogFormat,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: Option<String>,
}

/// Load settings from `path`, or from [`DEFAULT_SETTINGS_FILE`] if it exists.
pub fn load_settings(path: Option<&Path>) -> ConfigResult<Settings> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::Missing(path.display().to_string()));
            }
            parse_settings(path)
        }
        None => {
            let fallback = Path::new(DEFAULT_SETTINGS_FILE);
            if fallback.exists() {
                parse_settings(fallback)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

fn parse_settings(path: &Path) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}
