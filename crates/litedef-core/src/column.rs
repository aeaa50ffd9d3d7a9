use std::fmt;

use serde::Serialize;

use crate::value::{RawColumnSpec, RawValue};

pub const KEY_TYPE: &str = "type";
pub const KEY_UNIQUE: &str = "unique";
pub const KEY_MANDATORY: &str = "mandatory";
pub const KEY_DEFAULT: &str = "default";

/// Option names in the order their spellings are reconciled.
const CANONICAL_KEYS: [&str; 4] = [KEY_TYPE, KEY_MANDATORY, KEY_UNIQUE, KEY_DEFAULT];

pub const DEFAULT_TYPE: ColumnAffinity = ColumnAffinity::Text;
pub const DEFAULT_MANDATORY: bool = false;
pub const DEFAULT_UNIQUE: bool = false;

/// SQLite type affinities accepted for user columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnAffinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl ColumnAffinity {
    pub const ALL: [ColumnAffinity; 5] = [
        ColumnAffinity::Integer,
        ColumnAffinity::Text,
        ColumnAffinity::Blob,
        ColumnAffinity::Real,
        ColumnAffinity::Numeric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnAffinity::Integer => "INTEGER",
            ColumnAffinity::Text => "TEXT",
            ColumnAffinity::Blob => "BLOB",
            ColumnAffinity::Real => "REAL",
            ColumnAffinity::Numeric => "NUMERIC",
        }
    }

    /// Parse an affinity keyword. Matching is exact; callers uppercase first.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|affinity| affinity.as_str() == value)
    }
}

impl fmt::Display for ColumnAffinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized `type` setting; unsupported values are kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeSetting {
    Valid(ColumnAffinity),
    Invalid(String),
}

/// Normalized boolean setting; values that are not booleans are kept as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlagSetting {
    Valid(bool),
    Invalid(RawValue),
}

impl FlagSetting {
    fn from_raw(value: Option<RawValue>, default: bool) -> Self {
        match value {
            None => FlagSetting::Valid(default),
            Some(RawValue::Bool(flag)) => FlagSetting::Valid(flag),
            Some(RawValue::Text(text)) if text.eq_ignore_ascii_case("true") => {
                FlagSetting::Valid(true)
            }
            Some(RawValue::Text(text)) if text.eq_ignore_ascii_case("false") => {
                FlagSetting::Valid(false)
            }
            Some(other) => FlagSetting::Invalid(other),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagSetting::Valid(flag) => Some(*flag),
            FlagSetting::Invalid(_) => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, FlagSetting::Valid(true))
    }
}

/// A non-null column default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DefaultValue {
    fn from_raw(value: RawValue) -> Option<Self> {
        match value {
            RawValue::Null => None,
            RawValue::Text(text) if text.eq_ignore_ascii_case("null") => None,
            RawValue::Text(text) => Some(DefaultValue::Text(text)),
            RawValue::Bool(flag) => Some(DefaultValue::Bool(flag)),
            RawValue::Integer(number) => Some(DefaultValue::Integer(number)),
            RawValue::Float(number) => Some(DefaultValue::Float(number)),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // SQLite stores booleans as integers.
            DefaultValue::Bool(flag) => f.write_str(if *flag { "1" } else { "0" }),
            DefaultValue::Integer(number) => write!(f, "{number}"),
            DefaultValue::Float(number) => write!(f, "{number}"),
            DefaultValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<DefaultValue> for RawValue {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Bool(flag) => RawValue::Bool(flag),
            DefaultValue::Integer(number) => RawValue::Integer(number),
            DefaultValue::Float(number) => RawValue::Float(number),
            DefaultValue::Text(text) => RawValue::Text(text),
        }
    }
}

/// Field-complete column configuration produced by [`normalize`].
///
/// Fields may still carry invalid values; check the accompanying errors
/// before using it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalColumnSpec {
    #[serde(rename = "type")]
    pub column_type: TypeSetting,
    pub mandatory: FlagSetting,
    pub unique: FlagSetting,
    pub default: Option<DefaultValue>,
}

impl Default for CanonicalColumnSpec {
    fn default() -> Self {
        Self {
            column_type: TypeSetting::Valid(DEFAULT_TYPE),
            mandatory: FlagSetting::Valid(DEFAULT_MANDATORY),
            unique: FlagSetting::Valid(DEFAULT_UNIQUE),
            default: None,
        }
    }
}

impl From<&CanonicalColumnSpec> for RawColumnSpec {
    fn from(spec: &CanonicalColumnSpec) -> Self {
        let column_type = match &spec.column_type {
            TypeSetting::Valid(affinity) => RawValue::from(affinity.as_str()),
            TypeSetting::Invalid(value) => RawValue::from(value.as_str()),
        };
        let flag = |setting: &FlagSetting| match setting {
            FlagSetting::Valid(value) => RawValue::Bool(*value),
            FlagSetting::Invalid(value) => value.clone(),
        };

        RawColumnSpec::new()
            .with(KEY_TYPE, column_type)
            .with(KEY_MANDATORY, flag(&spec.mandatory))
            .with(KEY_UNIQUE, flag(&spec.unique))
            .with(
                KEY_DEFAULT,
                spec.default.clone().map(RawValue::from).unwrap_or(RawValue::Null),
            )
    }
}

/// Fully checked column definition, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub affinity: ColumnAffinity,
    pub mandatory: bool,
    pub unique: bool,
    pub default: Option<DefaultValue>,
}

/// A single problem found in a column configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    pub code: String,
    pub setting: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(
        code: impl Into<String>,
        setting: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            setting: setting.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Canonical spec paired with every issue found while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub spec: CanonicalColumnSpec,
    pub errors: Vec<ConfigIssue>,
}

impl ValidationResult {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|issue| issue.message.clone()).collect()
    }

    /// Convert into a typed definition, or hand back the recorded issues.
    ///
    /// The returned issue list is never empty: a spec carrying invalid
    /// settings without recorded errors (e.g. one built by hand) is checked
    /// again here.
    pub fn into_definition(self) -> Result<ColumnDefinition, Vec<ConfigIssue>> {
        let ValidationResult { spec, errors } = self;
        if !errors.is_empty() {
            return Err(errors);
        }

        match (&spec.column_type, &spec.mandatory, &spec.unique) {
            (
                TypeSetting::Valid(affinity),
                FlagSetting::Valid(mandatory),
                FlagSetting::Valid(unique),
            ) => Ok(ColumnDefinition {
                affinity: *affinity,
                mandatory: *mandatory,
                unique: *unique,
                default: spec.default,
            }),
            _ => {
                let mut issues = Vec::new();
                check_type(&spec, &mut issues);
                check_flag(&spec.unique, KEY_UNIQUE, &mut issues);
                check_flag(&spec.mandatory, KEY_MANDATORY, &mut issues);
                Err(issues)
            }
        }
    }
}

/// Normalize and validate one raw column configuration.
///
/// All problems are collected; the canonical spec is returned even when
/// errors were found.
pub fn normalize(raw: &RawColumnSpec) -> ValidationResult {
    let mut errors = Vec::new();
    let entries = reconcile_keys(raw, &mut errors);

    let column_type = match take(&entries, KEY_TYPE) {
        None => TypeSetting::Valid(DEFAULT_TYPE),
        Some(value) => {
            let upper = value.to_string().to_uppercase();
            match ColumnAffinity::parse(&upper) {
                Some(affinity) => TypeSetting::Valid(affinity),
                None => TypeSetting::Invalid(upper),
            }
        }
    };
    let spec = CanonicalColumnSpec {
        column_type,
        mandatory: FlagSetting::from_raw(take(&entries, KEY_MANDATORY), DEFAULT_MANDATORY),
        unique: FlagSetting::from_raw(take(&entries, KEY_UNIQUE), DEFAULT_UNIQUE),
        default: take(&entries, KEY_DEFAULT).and_then(DefaultValue::from_raw),
    };

    check_type(&spec, &mut errors);
    check_flag(&spec.unique, KEY_UNIQUE, &mut errors);
    check_flag(&spec.mandatory, KEY_MANDATORY, &mut errors);
    check_unique_and_default(&spec, &mut errors);

    ValidationResult { spec, errors }
}

/// Fold differently-cased option keys onto their canonical spelling.
fn reconcile_keys(
    raw: &RawColumnSpec,
    errors: &mut Vec<ConfigIssue>,
) -> Vec<(String, RawValue)> {
    let mut entries = raw.entries().to_vec();

    for canonical in CANONICAL_KEYS {
        let mut idx = 0;
        while idx < entries.len() {
            let key = &entries[idx].0;
            if key == canonical || !key.eq_ignore_ascii_case(canonical) {
                idx += 1;
                continue;
            }

            // A canonical key holding null counts as unset and takes the variant's value.
            let (variant, value) = entries.remove(idx);
            match entries.iter_mut().find(|(key, _)| key == canonical) {
                Some((_, existing)) if !existing.is_null() => {
                    errors.push(ConfigIssue::new(
                        "duplicate_setting",
                        canonical,
                        format!(
                            "both '{variant}' and '{canonical}' were specified, removing '{variant}'"
                        ),
                    ));
                }
                Some((_, existing)) => *existing = value,
                None => entries.push((canonical.to_string(), value)),
            }
        }
    }

    entries
}

/// Null counts as "not set" for every option.
fn take(entries: &[(String, RawValue)], key: &str) -> Option<RawValue> {
    entries
        .iter()
        .find(|(existing, _)| existing == key)
        .map(|(_, value)| value.clone())
        .filter(|value| !value.is_null())
}

fn check_type(spec: &CanonicalColumnSpec, errors: &mut Vec<ConfigIssue>) {
    if let TypeSetting::Invalid(value) = &spec.column_type {
        errors.push(ConfigIssue::new(
            "unsupported_type",
            KEY_TYPE,
            format!("setting '{KEY_TYPE}' to '{value}' is not supported"),
        ));
    }
}

fn check_flag(setting: &FlagSetting, key: &str, errors: &mut Vec<ConfigIssue>) {
    if setting.as_bool().is_none() {
        errors.push(ConfigIssue::new(
            "invalid_boolean",
            key,
            format!("value for setting '{key}' is not correct (expected true or false)"),
        ));
    }
}

fn check_unique_and_default(spec: &CanonicalColumnSpec, errors: &mut Vec<ConfigIssue>) {
    if let (true, Some(default)) = (spec.unique.is_true(), &spec.default) {
        errors.push(ConfigIssue::new(
            "unique_with_default",
            KEY_DEFAULT,
            format!("requiring a unique column with a default value '{default}' does not make sense"),
        ));
    }
}
