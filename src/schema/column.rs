//! Column definitions and the options accepted when declaring a column

use serde::Deserialize;
use std::fmt;

use crate::dialect::{Dialect, SqlSyntax};
use crate::render::escape_string;
use crate::schema::constraint::{ForeignKeyOptions, Reference};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ColumnType {
    PrimaryKey,
    Integer,
    BigInteger,
    String,
    Text,
    Boolean,
    Float,
    Decimal,
    Date,
    DateTime,
    Timestamp,
    Binary,
    /// Passed through to the database verbatim.
    Custom(String),
}

impl From<&str> for ColumnType {
    fn from(name: &str) -> Self {
        match name {
            "primary_key" => ColumnType::PrimaryKey,
            "integer" => ColumnType::Integer,
            "big_integer" | "bigint" => ColumnType::BigInteger,
            "string" => ColumnType::String,
            "text" => ColumnType::Text,
            "boolean" => ColumnType::Boolean,
            "float" => ColumnType::Float,
            "decimal" => ColumnType::Decimal,
            "date" => ColumnType::Date,
            "datetime" => ColumnType::DateTime,
            "timestamp" => ColumnType::Timestamp,
            "binary" => ColumnType::Binary,
            other => ColumnType::Custom(other.to_string()),
        }
    }
}

impl From<String> for ColumnType {
    fn from(name: String) -> Self {
        ColumnType::from(name.as_str())
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::PrimaryKey => "primary_key",
            ColumnType::Integer => "integer",
            ColumnType::BigInteger => "big_integer",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Float => "float",
            ColumnType::Decimal => "decimal",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Binary => "binary",
            ColumnType::Custom(name) => name,
        };
        f.write_str(name)
    }
}

/// A column default. Text is emitted as an escaped string literal, expressions verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Expression { expr: String },
}

impl DefaultValue {
    pub fn expr(expression: impl Into<String>) -> Self {
        DefaultValue::Expression {
            expr: expression.into(),
        }
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        match self {
            DefaultValue::Boolean(value) => dialect.boolean_literal(*value).to_string(),
            DefaultValue::Integer(value) => value.to_string(),
            DefaultValue::Float(value) => value.to_string(),
            DefaultValue::Text(value) => escape_string(value),
            DefaultValue::Expression { expr } => expr.clone(),
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Boolean(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Integer(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        DefaultValue::Integer(value.into())
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Float(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
    pub limit: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub default: Option<DefaultValue>,
    /// `Some(false)` renders `NOT NULL`; unspecified leaves the column nullable.
    pub null: Option<bool>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            limit: None,
            precision: None,
            scale: None,
            default: None,
            null: None,
        }
    }

    /// Overwrite type and attributes from a (re)declaration.
    pub(crate) fn apply(
        &mut self,
        column_type: ColumnType,
        options: &ColumnOptions,
        syntax: impl SqlSyntax,
    ) {
        self.limit = options
            .limit
            .or_else(|| syntax.default_limit_for_type(&column_type));
        self.column_type = column_type;
        self.precision = options.precision;
        self.scale = options.scale;
        self.default = options.default.clone();
        self.null = options.null;
    }
}

/// Target of an inline `references` column option.
///
/// The bare form names only the table (target column `id`); the detailed form
/// carries the foreign-key sub-options through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReferencesOption {
    Table(String),
    Detailed(ReferenceDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReferenceDetails {
    pub table: String,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cascade: Option<bool>,
    #[serde(default)]
    pub deferrable: Option<bool>,
    #[serde(default)]
    pub initially: Option<String>,
}

impl ReferencesOption {
    pub fn table(&self) -> &str {
        match self {
            ReferencesOption::Table(table) => table,
            ReferencesOption::Detailed(details) => &details.table,
        }
    }

    pub fn into_foreign_key_options(self) -> ForeignKeyOptions {
        match self {
            ReferencesOption::Table(table) => ForeignKeyOptions::new(Reference::Table(table)),
            ReferencesOption::Detailed(details) => {
                let references = match details.column {
                    Some(column) => Reference::Column {
                        table: details.table,
                        column,
                    },
                    None => Reference::Table(details.table),
                };
                ForeignKeyOptions {
                    name: details.name,
                    references: Some(references),
                    cascade: details.cascade,
                    deferrable: details.deferrable,
                    initially: details.initially,
                }
            }
        }
    }
}

impl From<&str> for ReferencesOption {
    fn from(table: &str) -> Self {
        ReferencesOption::Table(table.to_string())
    }
}

impl From<ReferenceDetails> for ReferencesOption {
    fn from(details: ReferenceDetails) -> Self {
        ReferencesOption::Detailed(details)
    }
}

/// Options accepted by `TableBuilder::column`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnOptions {
    pub limit: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub default: Option<DefaultValue>,
    /// Written `nullable` in YAML: a plain `null` key reads as a null scalar.
    #[serde(rename = "nullable", alias = "null")]
    pub null: Option<bool>,
    pub unique: bool,
    pub references: Option<ReferencesOption>,
    /// Raw boolean SQL fragment appended after the column name, e.g. `> 0`.
    pub check: Option<String>,
}

impl ColumnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn null(mut self, null: bool) -> Self {
        self.null = Some(null);
        self
    }

    pub fn not_null(self) -> Self {
        self.null(false)
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn references(mut self, references: impl Into<ReferencesOption>) -> Self {
        self.references = Some(references.into());
        self
    }

    pub fn check(mut self, expression: impl Into<String>) -> Self {
        self.check = Some(expression.into());
        self
    }
}
