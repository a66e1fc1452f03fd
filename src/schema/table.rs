//! Table builder: accumulates columns and constraints while a table is declared

use itertools::Itertools;
use tracing::{debug, warn};

use crate::dialect::{Dialect, SqlSyntax};
use crate::render::sql::render_column_definition;
use crate::schema::column::{ColumnDefinition, ColumnOptions, ColumnType, ReferencesOption};
use crate::schema::constraint::{ConstraintDefinition, ConstraintOptions};
use crate::schema::inflect::{Conventions, foreign_key_column};

/// Slot of a column in its builder. Identity, not name, decides whether a column is
/// already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(usize);

impl ColumnId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A column addressed either by slot or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Id(ColumnId),
    Name(String),
}

impl From<ColumnId> for ColumnRef {
    fn from(id: ColumnId) -> Self {
        ColumnRef::Id(id)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<&String> for ColumnRef {
    fn from(name: &String) -> Self {
        ColumnRef::Name(name.clone())
    }
}

/// Columns and constraints of one table declaration.
///
/// Quoting and default limits come from `S`: the connection when driven by
/// [`crate::schema_ops::SchemaManager`], or a plain [`Dialect`].
#[derive(Debug, Clone)]
pub struct TableBuilder<S = Dialect> {
    name: String,
    syntax: S,
    conventions: Conventions,
    columns: Vec<ColumnDefinition>,
    constraints: Vec<ConstraintDefinition>,
    skipped_constraints: usize,
}

impl<S: SqlSyntax> TableBuilder<S> {
    pub fn new(name: impl Into<String>, syntax: S, conventions: Conventions) -> Self {
        Self {
            name: name.into(),
            syntax,
            conventions,
            columns: Vec::new(),
            constraints: Vec::new(),
            skipped_constraints: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dialect(&self) -> Dialect {
        self.syntax.dialect()
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn constraints(&self) -> &[ConstraintDefinition] {
        &self.constraints
    }

    /// Constraints dropped because a target column could not be resolved.
    pub fn skipped_constraints(&self) -> usize {
        self.skipped_constraints
    }

    pub fn column_id(&self, name: &str) -> Option<ColumnId> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .map(ColumnId)
    }

    pub fn find_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.column_id(name).map(|id| &self.columns[id.0])
    }

    fn resolve(&self, column: &ColumnRef) -> Option<ColumnId> {
        match column {
            ColumnRef::Id(id) if id.0 < self.columns.len() => Some(*id),
            ColumnRef::Id(_) => None,
            ColumnRef::Name(name) => self.column_id(name),
        }
    }

    /// Declare (or redeclare) a column, then register any inline constraints.
    ///
    /// Inline constraints repeated by a redeclaration merge into the records the
    /// first declaration registered.
    pub fn column(
        &mut self,
        name: &str,
        column_type: ColumnType,
        options: ColumnOptions,
    ) -> &mut Self {
        let id = match self.column_id(name) {
            Some(id) => id,
            None => {
                self.columns
                    .push(ColumnDefinition::new(name, column_type.clone()));
                ColumnId(self.columns.len() - 1)
            }
        };
        self.columns[id.0].apply(column_type, &options, &self.syntax);

        let ColumnOptions {
            unique,
            references,
            check,
            ..
        } = options;

        if unique {
            self.constraint([id], ConstraintOptions::unique());
        }
        if let Some(references) = references {
            self.constraint([id], references.into_foreign_key_options());
        }
        if let Some(expression) = check {
            self.constraint([id], ConstraintOptions::check(expression));
        }
        self
    }

    pub fn primary_key(&mut self, name: &str) -> &mut Self {
        self.column(name, ColumnType::PrimaryKey, ColumnOptions::new())
    }

    pub fn string(&mut self, name: &str, options: ColumnOptions) -> &mut Self {
        self.column(name, ColumnType::String, options)
    }

    pub fn text(&mut self, name: &str, options: ColumnOptions) -> &mut Self {
        self.column(name, ColumnType::Text, options)
    }

    pub fn integer(&mut self, name: &str, options: ColumnOptions) -> &mut Self {
        self.column(name, ColumnType::Integer, options)
    }

    pub fn big_integer(&mut self, name: &str, options: ColumnOptions) -> &mut Self {
        self.column(name, ColumnType::BigInteger, options)
    }

    pub fn boolean(&mut self, name: &str, options: ColumnOptions) -> &mut Self {
        self.column(name, ColumnType::Boolean, options)
    }

    pub fn decimal(&mut self, name: &str, options: ColumnOptions) -> &mut Self {
        self.column(name, ColumnType::Decimal, options)
    }

    pub fn datetime(&mut self, name: &str, options: ColumnOptions) -> &mut Self {
        self.column(name, ColumnType::DateTime, options)
    }

    /// `created_at` and `updated_at`, both non-null.
    pub fn timestamps(&mut self) -> &mut Self {
        self.datetime("created_at", ColumnOptions::new().not_null());
        self.datetime("updated_at", ColumnOptions::new().not_null())
    }

    /// Integer foreign key column named after `table` by convention.
    ///
    /// Non-null and referencing `table` unless the caller's options say otherwise.
    pub fn reference(&mut self, table: &str, mut options: ColumnOptions) -> &mut Self {
        let column = foreign_key_column(table, &self.conventions);
        if options.null.is_none() {
            options.null = Some(false);
        }
        if options.references.is_none() {
            options.references = Some(ReferencesOption::from(table));
        }
        self.column(&column, ColumnType::Integer, options)
    }

    /// Register a constraint on one or more existing columns.
    ///
    /// A constraint carrying the explicit name of one already registered is merged
    /// into it. Otherwise every column must resolve, or the constraint is skipped;
    /// an unnamed constraint whose kind and columns match an unnamed record merges
    /// into that record.
    pub fn constraint<I, C>(&mut self, columns: I, options: impl Into<ConstraintOptions>) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnRef>,
    {
        let options = options.into();

        if let Some(name) = options.name() {
            if let Some(existing) = self
                .constraints
                .iter_mut()
                .find(|c| c.name() == Some(name))
            {
                let name = name.to_string();
                if existing.options.merge(options) {
                    debug!(table = %self.name, constraint = %name, "Merged constraint options");
                } else {
                    warn!(
                        table = %self.name,
                        constraint = %name,
                        kind = %existing.kind(),
                        "Constraint name already used by a different kind; keeping the first"
                    );
                }
                return self;
            }
        }

        let refs: Vec<ColumnRef> = columns.into_iter().map(Into::into).collect();
        let resolved = refs
            .iter()
            .map(|c| self.resolve(c))
            .collect::<Option<Vec<_>>>()
            .filter(|ids| !ids.is_empty());

        match resolved {
            Some(ids) => {
                // Unnamed records of one kind over the same columns share a default name.
                let duplicate = if options.name().is_none() {
                    self.constraints.iter_mut().find(|c| {
                        c.name().is_none() && c.kind() == options.kind() && c.columns == ids
                    })
                } else {
                    None
                };
                match duplicate {
                    Some(existing) => {
                        debug!(
                            table = %self.name,
                            kind = %existing.kind(),
                            "Merged constraint with the same default name"
                        );
                        existing.options.merge(options);
                    }
                    None => self.constraints.push(ConstraintDefinition {
                        columns: ids,
                        options,
                    }),
                }
            }
            None => {
                self.skipped_constraints += 1;
                warn!(
                    table = %self.name,
                    kind = %options.kind(),
                    columns = ?refs,
                    "Skipping constraint on unknown column"
                );
            }
        }
        self
    }

    /// Column definitions followed by non-empty constraint clauses, comma separated.
    pub fn to_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| render_column_definition(&self.syntax, c));
        let clauses = self
            .constraints
            .iter()
            .filter_map(|c| c.to_sql(&self.syntax, &self.name, &self.columns));
        columns.chain(clauses).join(", ")
    }
}
