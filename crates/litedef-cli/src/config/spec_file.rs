use std::path::Path;

use litedef_core::TableSpec;

use super::ConfigResult;

/// Read a table spec; `.toml` files are decoded as TOML, anything else as JSON.
pub fn load_table_spec(path: &Path) -> ConfigResult<TableSpec> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let table: TableSpec = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(table)
}
