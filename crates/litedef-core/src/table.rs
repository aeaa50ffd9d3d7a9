use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::value::RawColumnSpec;

/// A table name plus its raw column configurations, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    #[serde(
        default,
        serialize_with = "serialize_columns",
        deserialize_with = "deserialize_columns"
    )]
    pub columns: Vec<(String, RawColumnSpec)>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Add or replace a column; a replaced column keeps its position.
    pub fn insert_column(&mut self, name: impl Into<String>, spec: RawColumnSpec) {
        let name = name.into();
        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = spec,
            None => self.columns.push((name, spec)),
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, spec: RawColumnSpec) -> Self {
        self.insert_column(name, spec);
        self
    }

    pub fn column(&self, name: &str) -> Option<&RawColumnSpec> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }
}

fn serialize_columns<S>(
    columns: &[(String, RawColumnSpec)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(columns.len()))?;
    for (name, spec) in columns {
        map.serialize_entry(name, spec)?;
    }
    map.end()
}

fn deserialize_columns<'de, D>(
    deserializer: D,
) -> Result<Vec<(String, RawColumnSpec)>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(ColumnsVisitor)
}

struct ColumnsVisitor;

impl<'de> Visitor<'de> for ColumnsVisitor {
    type Value = Vec<(String, RawColumnSpec)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of column names to column options")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = TableSpec::default();
        while let Some((name, spec)) = map.next_entry::<String, RawColumnSpec>()? {
            table.insert_column(name, spec);
        }
        Ok(table.columns)
    }
}
