mod config;
mod logging;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use config::{ConfigError, LogFormat, Settings, load_settings, load_table_spec};
use litedef_core::{
    DdlError, RawColumnSpec, TableSpec, normalize, render_add_column, render_table,
};
use litedef_sqlite::{SchemaManager, SqliteError, SqliteExecutor};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Ddl(#[from] DdlError),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] SqliteError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("column '{column}' is not defined in table spec '{table}'")]
    UnknownColumn { table: String, column: String },
    #[error("{0} column(s) have configuration errors")]
    InvalidSpec(usize),
}

#[derive(Parser, Debug)]
#[command(name = "litedef", version, about = "SQLite table definitions from column specs")]
struct Cli {
    /// Settings file (defaults to ./litedef.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log output format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize every column of a table spec and print the canonical form.
    Check(CheckArgs),
    /// Print (and optionally apply) the CREATE TABLE statement.
    CreateTable(CreateTableArgs),
    /// Print (and optionally apply) an ALTER TABLE ... ADD COLUMN statement.
    AddColumn(AddColumnArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Table spec file (.toml or .json).
    spec: PathBuf,
}

#[derive(Args, Debug)]
struct DatabaseArgs {
    /// SQLite database file to apply the statement to.
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
    /// Fail when the database file does not exist yet.
    #[arg(long, default_value_t = false)]
    require_existing: bool,
}

#[derive(Args, Debug)]
struct CreateTableArgs {
    /// Table spec file (.toml or .json).
    spec: PathBuf,
    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Args, Debug)]
struct AddColumnArgs {
    /// Table spec file (.toml or .json).
    spec: PathBuf,
    /// Column of the spec file to add.
    #[arg(long)]
    column: String,
    /// Target table; defaults to the name in the spec file.
    #[arg(long)]
    table: Option<String>,
    #[command(flatten)]
    database: DatabaseArgs,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;
    let log_format = cli.log_format.unwrap_or(settings.log_format);
    logging::init_logging(log_format, settings.log_filter.as_deref()).map_err(CliError::Logging)?;

    let timer = Instant::now();
    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::CreateTable(args) => run_create_table(args, &settings).await,
        Command::AddColumn(args) => run_add_column(args, &settings).await,
    };

    let duration_ms = timer.elapsed().as_millis();
    match &result {
        Ok(()) => tracing::info!(event = "command_finished", status = "success", duration_ms),
        Err(err) => tracing::error!(
            event = "command_finished",
            status = "failure",
            duration_ms,
            error = %err
        ),
    }
    result
}

fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let table = load_table_spec(&args.spec)?;
    tracing::info!(event = "spec_loaded", table = %table.name, columns = table.columns.len());

    let mut invalid = 0;
    let mut report = Vec::with_capacity(table.columns.len());
    for (name, raw) in &table.columns {
        let result = normalize(raw);
        for issue in &result.errors {
            tracing::warn!(
                event = "config_issue",
                column = %name,
                code = %issue.code,
                setting = %issue.setting,
                message = %issue.message
            );
        }
        if !result.is_ok() {
            invalid += 1;
        }
        report.push(json!({
            "column": name,
            "spec": result.spec,
            "errors": result.messages(),
        }));
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "table": table.name, "columns": report }))?
    );

    if invalid > 0 {
        return Err(CliError::InvalidSpec(invalid));
    }
    Ok(())
}

async fn run_create_table(args: CreateTableArgs, settings: &Settings) -> Result<(), CliError> {
    let table = load_table_spec(&args.spec)?;

    let sql = match open_database(&args.database, settings).await? {
        Some(manager) => manager.create_table(&table).await?,
        None => render_table(&table)?,
    };
    println!("{sql};");
    Ok(())
}

async fn run_add_column(args: AddColumnArgs, settings: &Settings) -> Result<(), CliError> {
    let spec = load_table_spec(&args.spec)?;
    let table_name = args.table.clone().unwrap_or_else(|| spec.name.clone());
    let raw = column_spec(&spec, &args.column)?;

    let sql = match open_database(&args.database, settings).await? {
        Some(manager) => manager.add_column(&table_name, &args.column, raw).await?,
        None => render_add_column(&table_name, &args.column, raw)?,
    };
    println!("{sql};");
    Ok(())
}

fn column_spec<'a>(
    table: &'a TableSpec,
    column: &str,
) -> Result<&'a RawColumnSpec, CliError> {
    table.column(column).ok_or_else(|| CliError::UnknownColumn {
        table: table.name.clone(),
        column: column.to_string(),
    })
}

/// Flags take precedence over the settings file.
async fn open_database(
    args: &DatabaseArgs,
    settings: &Settings,
) -> Result<Option<SchemaManager<SqliteExecutor>>, CliError> {
    let Some(path) = args.db.as_deref().or(settings.database.as_deref()) else {
        return Ok(None);
    };
    let must_exist = args.require_existing || settings.require_existing;

    tracing::info!(event = "database_selected", path = %path.display(), must_exist);
    let manager = SchemaManager::open(path, must_exist).await?;
    Ok(Some(manager))
}
