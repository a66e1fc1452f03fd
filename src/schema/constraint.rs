//! Constraint model: kinds, per-kind options, records held by a table builder and
//! the loosely-typed shape accepted by the standalone add/drop operations.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::dialect::SqlSyntax;
use crate::error::{Result, SchemaError};
use crate::render::sql::build_clause;
use crate::schema::column::ColumnDefinition;
use crate::schema::table::ColumnId;

/* ---------- Kinds ---------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign_key",
            ConstraintKind::Check => "check",
        }
    }

    /// Suffix used by default constraint names.
    pub fn suffix(&self) -> &'static str {
        match self {
            ConstraintKind::Unique => "uq",
            ConstraintKind::ForeignKey => "fkey",
            ConstraintKind::Check => "check",
        }
    }
}

impl FromStr for ConstraintKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unique" => Ok(ConstraintKind::Unique),
            "foreign_key" => Ok(ConstraintKind::ForeignKey),
            "check" => Ok(ConstraintKind::Check),
            other => Err(SchemaError::UnknownConstraintType(other.to_string())),
        }
    }
}

impl TryFrom<String> for ConstraintKind {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ---------- Options ---------- */

/// Foreign key target: a bare table (target column `id`) or an explicit table/column pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Table(String),
    Column { table: String, column: String },
}

impl Reference {
    pub fn table(&self) -> &str {
        match self {
            Reference::Table(table) => table,
            Reference::Column { table, .. } => table,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Reference::Table(_) => "id",
            Reference::Column { column, .. } => column,
        }
    }
}

impl From<&str> for Reference {
    fn from(table: &str) -> Self {
        Reference::Table(table.to_string())
    }
}

impl From<(&str, &str)> for Reference {
    fn from((table, column): (&str, &str)) -> Self {
        Reference::Column {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

fn keep_newer<T>(current: &mut Option<T>, newer: Option<T>) {
    if newer.is_some() {
        *current = newer;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueOptions {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKeyOptions {
    pub name: Option<String>,
    pub references: Option<Reference>,
    pub cascade: Option<bool>,
    pub deferrable: Option<bool>,
    /// Caller-supplied mode such as `DEFERRED` or `IMMEDIATE`; not validated.
    pub initially: Option<String>,
}

impl ForeignKeyOptions {
    pub fn new(references: impl Into<Reference>) -> Self {
        Self {
            references: Some(references.into()),
            ..Self::default()
        }
    }

    pub fn cascade(mut self, cascade: bool) -> Self {
        self.cascade = Some(cascade);
        self
    }

    pub fn deferrable(mut self, deferrable: bool) -> Self {
        self.deferrable = Some(deferrable);
        self
    }

    pub fn initially(mut self, mode: impl Into<String>) -> Self {
        self.initially = Some(mode.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub name: Option<String>,
    /// Raw SQL appended after the column name. Without it the check renders to nothing.
    pub expression: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOptions {
    Unique(UniqueOptions),
    ForeignKey(ForeignKeyOptions),
    Check(CheckOptions),
}

impl ConstraintOptions {
    pub fn unique() -> Self {
        ConstraintOptions::Unique(UniqueOptions::default())
    }

    pub fn foreign_key(references: impl Into<Reference>) -> Self {
        ConstraintOptions::ForeignKey(ForeignKeyOptions::new(references))
    }

    pub fn check(expression: impl Into<String>) -> Self {
        ConstraintOptions::Check(CheckOptions {
            name: None,
            expression: Some(expression.into()),
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = Some(name.into());
        match &mut self {
            ConstraintOptions::Unique(opts) => opts.name = name,
            ConstraintOptions::ForeignKey(opts) => opts.name = name,
            ConstraintOptions::Check(opts) => opts.name = name,
        }
        self
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            ConstraintOptions::Unique(_) => ConstraintKind::Unique,
            ConstraintOptions::ForeignKey(_) => ConstraintKind::ForeignKey,
            ConstraintOptions::Check(_) => ConstraintKind::Check,
        }
    }

    /// Explicit name, ignoring an empty string.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            ConstraintOptions::Unique(opts) => opts.name.as_deref(),
            ConstraintOptions::ForeignKey(opts) => opts.name.as_deref(),
            ConstraintOptions::Check(opts) => opts.name.as_deref(),
        };
        name.filter(|n| !n.is_empty())
    }

    /// Merge newer options into these, key by key. Keys absent from `newer` keep
    /// their current value.
    ///
    /// Returns `false`, leaving `self` untouched, when the kinds differ.
    pub fn merge(&mut self, newer: ConstraintOptions) -> bool {
        match (self, newer) {
            (ConstraintOptions::Unique(current), ConstraintOptions::Unique(newer)) => {
                keep_newer(&mut current.name, newer.name);
            }
            (ConstraintOptions::ForeignKey(current), ConstraintOptions::ForeignKey(newer)) => {
                keep_newer(&mut current.name, newer.name);
                keep_newer(&mut current.references, newer.references);
                keep_newer(&mut current.cascade, newer.cascade);
                keep_newer(&mut current.deferrable, newer.deferrable);
                keep_newer(&mut current.initially, newer.initially);
            }
            (ConstraintOptions::Check(current), ConstraintOptions::Check(newer)) => {
                keep_newer(&mut current.name, newer.name);
                keep_newer(&mut current.expression, newer.expression);
            }
            _ => return false,
        }
        true
    }
}

impl From<UniqueOptions> for ConstraintOptions {
    fn from(options: UniqueOptions) -> Self {
        ConstraintOptions::Unique(options)
    }
}

impl From<ForeignKeyOptions> for ConstraintOptions {
    fn from(options: ForeignKeyOptions) -> Self {
        ConstraintOptions::ForeignKey(options)
    }
}

impl From<CheckOptions> for ConstraintOptions {
    fn from(options: CheckOptions) -> Self {
        ConstraintOptions::Check(options)
    }
}

/* ---------- Records ---------- */

/// A constraint registered on a table under construction.
///
/// Columns are slots in the owning builder's column arena; the owning table's
/// name is supplied when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDefinition {
    pub columns: Vec<ColumnId>,
    pub options: ConstraintOptions,
}

impl ConstraintDefinition {
    pub fn kind(&self) -> ConstraintKind {
        self.options.kind()
    }

    pub fn name(&self) -> Option<&str> {
        self.options.name()
    }

    /// Render the `CONSTRAINT ...` clause, or `None` when there is nothing to emit.
    pub fn to_sql(
        &self,
        syntax: impl SqlSyntax,
        table: &str,
        columns: &[ColumnDefinition],
    ) -> Option<String> {
        let names = self
            .columns
            .iter()
            .map(|id| columns.get(id.index()).map(|c| c.name.as_str()))
            .collect::<Option<Vec<_>>>()?;
        build_clause(syntax, table, names.as_slice(), &self.options)
    }
}

/* ---------- Standalone shapes ---------- */

/// One column or a list of columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnList {
    One(String),
    Many(Vec<String>),
}

impl ColumnList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            ColumnList::One(column) => vec![column.clone()],
            ColumnList::Many(columns) => columns.clone(),
        }
    }
}

impl From<&str> for ColumnList {
    fn from(column: &str) -> Self {
        ColumnList::One(column.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnList {
    fn from(columns: [&str; N]) -> Self {
        ColumnList::Many(columns.iter().map(|c| c.to_string()).collect())
    }
}

impl From<Vec<String>> for ColumnList {
    fn from(columns: Vec<String>) -> Self {
        ColumnList::Many(columns)
    }
}

/// Options mapping for adding or dropping a constraint on an existing table.
///
/// The kind is taken from whichever of `unique`, `foreign_key` or `check` is
/// present (checked in that order), or from an explicit `type` paired with
/// `columns`. The check expression is carried in `expression`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConstraintShape {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub columns: Option<ColumnList>,
    pub unique: Option<ColumnList>,
    pub foreign_key: Option<ColumnList>,
    pub check: Option<ColumnList>,
    pub references: Option<Reference>,
    pub cascade: Option<bool>,
    pub deferrable: Option<bool>,
    pub initially: Option<String>,
    pub expression: Option<String>,
}

impl ConstraintShape {
    pub fn unique(columns: impl Into<ColumnList>) -> Self {
        Self {
            unique: Some(columns.into()),
            ..Self::default()
        }
    }

    pub fn foreign_key(columns: impl Into<ColumnList>, references: impl Into<Reference>) -> Self {
        Self {
            foreign_key: Some(columns.into()),
            references: Some(references.into()),
            ..Self::default()
        }
    }

    pub fn check(columns: impl Into<ColumnList>, expression: impl Into<String>) -> Self {
        Self {
            check: Some(columns.into()),
            expression: Some(expression.into()),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn cascade(mut self) -> Self {
        self.cascade = Some(true);
        self
    }

    pub fn deferrable(mut self, initially: Option<&str>) -> Self {
        self.deferrable = Some(true);
        self.initially = initially.map(str::to_string);
        self
    }

    fn columns_for(&self, kind: ConstraintKind) -> Option<&ColumnList> {
        match kind {
            ConstraintKind::Unique => self.unique.as_ref(),
            ConstraintKind::ForeignKey => self.foreign_key.as_ref(),
            ConstraintKind::Check => self.check.as_ref(),
        }
    }

    fn detect(&self) -> Option<(ConstraintKind, &ColumnList)> {
        [
            ConstraintKind::Unique,
            ConstraintKind::ForeignKey,
            ConstraintKind::Check,
        ]
        .into_iter()
        .find_map(|kind| self.columns_for(kind).map(|columns| (kind, columns)))
    }

    /// Resolve the constrained columns and typed options this shape describes.
    pub fn resolve(&self, table: &str) -> Result<(Vec<String>, ConstraintOptions)> {
        let unrecognized = || SchemaError::UnrecognizedConstraintShape {
            table: table.to_string(),
        };

        let (kind, columns) = match &self.kind {
            Some(kind) => {
                let kind: ConstraintKind = kind.parse()?;
                let columns = self
                    .columns
                    .as_ref()
                    .or_else(|| self.columns_for(kind))
                    .ok_or_else(unrecognized)?;
                (kind, columns)
            }
            None => self.detect().ok_or_else(unrecognized)?,
        };

        let columns = columns.to_vec();
        if columns.is_empty() {
            return Err(unrecognized());
        }

        let name = self.name.clone();
        let options = match kind {
            ConstraintKind::Unique => ConstraintOptions::Unique(UniqueOptions { name }),
            ConstraintKind::ForeignKey => ConstraintOptions::ForeignKey(ForeignKeyOptions {
                name,
                references: self.references.clone(),
                cascade: self.cascade,
                deferrable: self.deferrable,
                initially: self.initially.clone(),
            }),
            ConstraintKind::Check => ConstraintOptions::Check(CheckOptions {
                name,
                expression: self.expression.clone(),
            }),
        };
        debug!(table, kind = %kind, ?columns, "Resolved constraint shape");

        Ok((columns, options))
    }
}
