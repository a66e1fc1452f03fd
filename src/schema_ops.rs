//! Schema operations: create tables and add or drop constraints on existing ones

use serde::Deserialize;
use tracing::{debug, info};

use crate::db::{Connection, DropTableOptions};
use crate::error::{Result, SchemaError};
use crate::naming::default_name;
use crate::render::sql::{
    build_clause, render_add_constraint, render_create_table, render_drop_constraint,
};
use crate::schema::{ConstraintShape, Conventions, TableBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateTableOptions {
    /// Add a primary key column. On by default.
    pub id: bool,
    /// Name of the primary key column, `id` when unset.
    pub primary_key: Option<String>,
    /// Drop an existing table of the same name first, ignoring any failure.
    pub force: bool,
    pub temporary: bool,
    /// Trailing table options such as `ENGINE=InnoDB`.
    pub options: Option<String>,
}

impl Default for CreateTableOptions {
    fn default() -> Self {
        Self {
            id: true,
            primary_key: None,
            force: false,
            temporary: false,
            options: None,
        }
    }
}

impl CreateTableOptions {
    pub fn without_id(mut self) -> Self {
        self.id = false;
        self
    }

    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }
}

/// Runs schema operations against a connection.
pub struct SchemaManager<C> {
    connection: C,
    conventions: Conventions,
}

impl<C: Connection> SchemaManager<C> {
    pub fn new(connection: C) -> Self {
        Self::with_conventions(connection, Conventions::default())
    }

    pub fn with_conventions(connection: C, conventions: Conventions) -> Self {
        Self {
            connection,
            conventions,
        }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn into_connection(self) -> C {
        self.connection
    }

    pub fn execute(&mut self, sql: &str) -> Result<()> {
        info!("Executing: {}", sql);
        self.connection.execute(sql)?;
        Ok(())
    }

    /// Declare a table through `declare` and create it.
    ///
    /// The builder renders with the connection's quoting and default limits.
    /// Returns the number of constraints dropped because their column could not
    /// be resolved.
    pub fn create_table<F>(
        &mut self,
        name: &str,
        options: &CreateTableOptions,
        declare: F,
    ) -> Result<usize>
    where
        F: FnOnce(&mut TableBuilder<&C>),
    {
        let (body, skipped) = {
            let mut table = TableBuilder::new(name, &self.connection, self.conventions.clone());
            if options.id {
                table.primary_key(options.primary_key.as_deref().unwrap_or("id"));
            }
            declare(&mut table);
            (table.to_sql(), table.skipped_constraints())
        };

        if options.force {
            if let Err(e) = self.connection.drop_table(name, DropTableOptions::default()) {
                debug!("Ignoring failure dropping {} before create: {}", name, e);
            }
        }

        let table_options = options
            .options
            .as_deref()
            .or_else(|| self.connection.dialect().default_table_options());
        let sql = render_create_table(
            &self.connection,
            name,
            &body,
            options.temporary,
            table_options,
        );
        self.execute(&sql)?;

        Ok(skipped)
    }

    /// Add a constraint to an existing table with `ALTER TABLE ... ADD`.
    pub fn add_constraint(&mut self, table: &str, shape: &ConstraintShape) -> Result<()> {
        let (columns, options) = shape.resolve(table)?;
        let clause = build_clause(&self.connection, table, columns.as_slice(), &options)
            .ok_or_else(|| SchemaError::UnrecognizedConstraintShape {
                table: table.to_string(),
            })?;

        let sql = render_add_constraint(&self.connection, table, &clause);
        self.execute(&sql)
    }

    /// Drop a constraint by its explicit name, or by the default name recomputed
    /// from the described columns.
    pub fn drop_constraint(&mut self, table: &str, shape: &ConstraintShape) -> Result<()> {
        let (columns, options) = shape.resolve(table)?;
        let name = match options.name() {
            Some(name) => name.to_string(),
            None => default_name(table, options.kind(), columns.as_slice()),
        };

        let sql = render_drop_constraint(&self.connection, table, options.kind(), &name);
        self.execute(&sql)
    }
}
