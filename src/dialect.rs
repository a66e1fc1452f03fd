//! SQL dialect variations: identifier quoting, native type names, default limits
//! and the handful of statement shapes that differ between databases.

use serde::{Deserialize, Serialize};

use crate::render::quote_ident;
use crate::schema::column::ColumnType;
use crate::schema::constraint::ConstraintKind;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// ANSI-flavoured output that only quotes identifiers when it has to.
    #[default]
    Generic,
    Postgres,
    Mysql,
    Sqlite,
}

/// Words that force quoting in the generic dialect.
const RESERVED_WORDS: &[&str] = &[
    "all", "and", "as", "check", "column", "constraint", "create", "default", "from", "foreign",
    "group", "key", "not", "null", "or", "order", "primary", "references", "select", "table",
    "unique", "user", "where",
];

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    starts_ok
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !RESERVED_WORDS.contains(&name)
}

impl Dialect {
    pub fn quote_identifier(&self, name: &str) -> String {
        match self {
            Dialect::Generic if is_plain_identifier(name) => name.to_string(),
            Dialect::Generic | Dialect::Postgres | Dialect::Sqlite => quote_ident(name),
            Dialect::Mysql => format!("`{}`", name.replace('`', "``")),
        }
    }

    /// Length applied to a column when the declaration gives none.
    pub fn default_limit(&self, column_type: &ColumnType) -> Option<u32> {
        match (self, column_type) {
            (_, ColumnType::String) => Some(255),
            (Dialect::Mysql, ColumnType::Integer) => Some(11),
            (Dialect::Mysql, ColumnType::BigInteger) => Some(20),
            _ => None,
        }
    }

    /// Native type name, without any limit or precision suffix.
    pub fn type_name(&self, column_type: &ColumnType) -> String {
        let name = match (self, column_type) {
            (_, ColumnType::PrimaryKey) => return self.primary_key_type().to_string(),
            (_, ColumnType::Custom(name)) => return name.clone(),
            (Dialect::Mysql, ColumnType::Integer) => "int",
            (_, ColumnType::Integer) => "integer",
            (_, ColumnType::BigInteger) => "bigint",
            (Dialect::Postgres, ColumnType::String) => "character varying",
            (_, ColumnType::String) => "varchar",
            (_, ColumnType::Text) => "text",
            (Dialect::Mysql, ColumnType::Boolean) => "tinyint(1)",
            (_, ColumnType::Boolean) => "boolean",
            (Dialect::Postgres, ColumnType::Float) => "double precision",
            (_, ColumnType::Float) => "float",
            (_, ColumnType::Decimal) => "decimal",
            (_, ColumnType::Date) => "date",
            (Dialect::Mysql | Dialect::Sqlite, ColumnType::DateTime) => "datetime",
            (_, ColumnType::DateTime) => "timestamp",
            (_, ColumnType::Timestamp) => "timestamp",
            (Dialect::Postgres, ColumnType::Binary) => "bytea",
            (_, ColumnType::Binary) => "blob",
        };
        name.to_string()
    }

    fn primary_key_type(&self) -> &'static str {
        match self {
            Dialect::Generic => "integer PRIMARY KEY",
            Dialect::Postgres => "serial PRIMARY KEY",
            Dialect::Mysql => "int(11) AUTO_INCREMENT PRIMARY KEY",
            Dialect::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL",
        }
    }

    pub fn boolean_literal(&self, value: bool) -> &'static str {
        match (self, value) {
            (Dialect::Mysql | Dialect::Sqlite, true) => "1",
            (Dialect::Mysql | Dialect::Sqlite, false) => "0",
            (_, true) => "TRUE",
            (_, false) => "FALSE",
        }
    }

    /// Trailing `CREATE TABLE` options used when the caller supplies none.
    pub fn default_table_options(&self) -> Option<&'static str> {
        match self {
            Dialect::Mysql => Some("ENGINE=InnoDB"),
            _ => None,
        }
    }

    /// Keyword sequence following `ALTER TABLE t DROP` for a named constraint.
    pub fn drop_constraint_keyword(&self, kind: ConstraintKind) -> &'static str {
        match (self, kind) {
            (Dialect::Mysql, ConstraintKind::ForeignKey) => "FOREIGN KEY",
            _ => "CONSTRAINT",
        }
    }
}

/// Identifier quoting and per-type default limits consulted while rendering.
///
/// Every [`crate::db::Connection`] is a `SqlSyntax`, so a connection overriding
/// either method changes the SQL its schema operations produce. A bare
/// [`Dialect`] renders with its own rules.
pub trait SqlSyntax {
    fn dialect(&self) -> Dialect;

    fn quote_identifier(&self, name: &str) -> String {
        self.dialect().quote_identifier(name)
    }

    fn default_limit_for_type(&self, column_type: &ColumnType) -> Option<u32> {
        self.dialect().default_limit(column_type)
    }
}

impl SqlSyntax for Dialect {
    fn dialect(&self) -> Dialect {
        *self
    }
}

impl<S: SqlSyntax + ?Sized> SqlSyntax for &S {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn quote_identifier(&self, name: &str) -> String {
        (**self).quote_identifier(name)
    }

    fn default_limit_for_type(&self, column_type: &ColumnType) -> Option<u32> {
        (**self).default_limit_for_type(column_type)
    }
}

impl<S: SqlSyntax + ?Sized> SqlSyntax for &mut S {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn quote_identifier(&self, name: &str) -> String {
        (**self).quote_identifier(name)
    }

    fn default_limit_for_type(&self, column_type: &ColumnType) -> Option<u32> {
        (**self).default_limit_for_type(column_type)
    }
}
