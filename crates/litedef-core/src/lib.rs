//! Column configuration normalization and SQLite DDL rendering.
//!
//! This crate turns loosely specified column options into canonical,
//! validated definitions and renders them as `CREATE TABLE` and
//! `ALTER TABLE ... ADD COLUMN` statements. It performs no I/O.

pub mod column;
pub mod ddl;
pub mod error;
pub mod table;
pub mod value;

pub use column::{
    CanonicalColumnSpec, ColumnAffinity, ColumnDefinition, ConfigIssue, DefaultValue, FlagSetting,
    TypeSetting, ValidationResult, normalize,
};
pub use ddl::{
    ID_COLUMN_DECLARATION, ID_COLUMN_NAME, id_column_clause, render_add_column,
    render_column_clause, render_create_table, render_table,
};
pub use error::{DdlError, Result};
pub use table::TableSpec;
pub use value::{RawColumnSpec, RawValue};
