use anyhow::{Context, Result};
use litedef_core::{RawColumnSpec, TableSpec};
use litedef_sqlite::{
    DB_FILE_MUST_EXIST, SchemaManager, SqliteError, connect_to, database_exists,
};

fn people_table() -> TableSpec {
    TableSpec::new("people")
        .with_column(
            "name",
            RawColumnSpec::new()
                .with("type", "text")
                .with("mandatory", true)
                .with("default", "anonymous"),
        )
        .with_column(
            "email",
            RawColumnSpec::new().with("TYPE", "text").with("unique", "true"),
        )
}

#[tokio::test]
async fn refuses_missing_database_when_required() -> Result<()> {
    let dir = tempfile::tempdir().context("creating temp dir")?;
    let path = dir.path().join("missing.db");

    let err = connect_to(&path, DB_FILE_MUST_EXIST)
        .await
        .expect_err("database must exist");

    assert!(matches!(err, SqliteError::MissingDatabase(_)));
    assert!(err.to_string().ends_with("does not exist"));
    assert!(!database_exists(&path));
    Ok(())
}

#[tokio::test]
async fn creates_table_and_adds_column() -> Result<()> {
    let dir = tempfile::tempdir().context("creating temp dir")?;
    let path = dir.path().join("test.db");

    let manager = SchemaManager::open(&path, false).await?;
    manager.create_table(&people_table()).await?;
    assert!(database_exists(&path));

    let age = RawColumnSpec::new()
        .with("type", "integer")
        .with("mandatory", true)
        .with("default", 0);
    let sql = manager.add_column("people", "age", &age).await?;
    assert_eq!(
        sql,
        "ALTER TABLE people ADD COLUMN age INTEGER NOT NULL DEFAULT '0'"
    );

    let columns = manager.list_columns("people").await?;
    let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
    assert_eq!(names, ["id", "name", "email", "age"]);

    let id = &columns[0];
    assert!(id.primary_key);
    assert_eq!(id.declared_type, "INTEGER");

    let name = &columns[1];
    assert!(name.not_null);
    assert_eq!(name.default_value.as_deref(), Some("'anonymous'"));

    Ok(())
}

#[tokio::test]
async fn create_table_is_repeatable() -> Result<()> {
    let dir = tempfile::tempdir().context("creating temp dir")?;
    let path = dir.path().join("repeat.db");

    let manager = SchemaManager::open(&path, false).await?;
    manager.create_table(&people_table()).await?;
    manager.create_table(&people_table()).await?;

    let reopened = SchemaManager::open(&path, DB_FILE_MUST_EXIST).await?;
    assert_eq!(reopened.list_columns("people").await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn unique_column_is_enforced() -> Result<()> {
    let dir = tempfile::tempdir().context("creating temp dir")?;
    let path = dir.path().join("unique.db");

    let manager = SchemaManager::open(&path, false).await?;
    manager.create_table(&people_table()).await?;

    let pool = manager.executor().pool();
    sqlx::query("insert into people (email) values ('a@example.com')")
        .execute(pool)
        .await?;
    let duplicate = sqlx::query("insert into people (email) values ('a@example.com')")
        .execute(pool)
        .await;

    assert!(duplicate.is_err());
    Ok(())
}

#[tokio::test]
async fn quoted_text_default_is_stored_verbatim() -> Result<()> {
    let dir = tempfile::tempdir().context("creating temp dir")?;
    let path = dir.path().join("quoted.db");

    let manager = SchemaManager::open(&path, false).await?;
    manager.create_table(&people_table()).await?;

    let surname = RawColumnSpec::new().with("default", "O'Brien");
    let sql = manager.add_column("people", "surname", &surname).await?;
    assert_eq!(sql, "ALTER TABLE people ADD COLUMN surname TEXT DEFAULT 'O''Brien'");

    let note = RawColumnSpec::new().with("default", "x'); DROP TABLE people; --");
    manager.add_column("people", "note", &note).await?;

    let columns = manager.list_columns("people").await?;
    let surname = columns
        .iter()
        .find(|column| column.name == "surname")
        .context("surname column")?;
    assert_eq!(surname.default_value.as_deref(), Some("'O''Brien'"));

    let pool = manager.executor().pool();
    sqlx::query("insert into people (email) values ('b@example.com')")
        .execute(pool)
        .await?;
    let (surname, note): (String, String) =
        sqlx::query_as("select surname, note from people where email = 'b@example.com'")
            .fetch_one(pool)
            .await?;
    assert_eq!(surname, "O'Brien");
    assert_eq!(note, "x'); DROP TABLE people; --");
    Ok(())
}

#[tokio::test]
async fn invalid_configuration_leaves_database_untouched() -> Result<()> {
    let dir = tempfile::tempdir().context("creating temp dir")?;
    let path = dir.path().join("invalid.db");

    let manager = SchemaManager::open(&path, false).await?;
    let table = TableSpec::new("broken")
        .with_column("ok", RawColumnSpec::new())
        .with_column("bad", RawColumnSpec::new().with("type", "VARCHAR(10)"));

    let err = manager.create_table(&table).await.expect_err("invalid column");
    assert!(matches!(err, SqliteError::Ddl(_)));
    assert!(manager.list_columns("broken").await?.is_empty());
    Ok(())
}
