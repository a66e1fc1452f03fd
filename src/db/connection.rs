//! The execution layer the schema operations talk to

use tracing::debug;

use crate::dialect::{Dialect, SqlSyntax};
use crate::error::ExecutionError;
use crate::render::sql::render_drop_table;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropTableOptions {
    pub if_exists: bool,
    pub cascade: bool,
}

/// A database connection able to run DDL statements one at a time.
///
/// Its [`SqlSyntax`] is the quoting and type facility for everything rendered
/// against it: overriding `quote_identifier` or `default_limit_for_type` on a
/// connection changes the statements it is handed.
pub trait Connection: SqlSyntax {
    /// Execute a single statement, blocking until the database has answered.
    fn execute(&mut self, sql: &str) -> Result<(), ExecutionError>;

    fn drop_table(&mut self, table: &str, options: DropTableOptions) -> Result<(), ExecutionError> {
        let sql = render_drop_table(&*self, table, options.if_exists, options.cascade);
        self.execute(&sql)
    }
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn execute(&mut self, sql: &str) -> Result<(), ExecutionError> {
        (**self).execute(sql)
    }

    fn drop_table(&mut self, table: &str, options: DropTableOptions) -> Result<(), ExecutionError> {
        (**self).drop_table(table, options)
    }
}

/// Connection that records statements instead of running them.
///
/// Used for dry-run rendering. Statements starting with a registered prefix are
/// rejected, which lets callers exercise failure paths without a database.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnection {
    dialect: Dialect,
    statements: Vec<String>,
    rejected_prefixes: Vec<String>,
}

impl RecordingConnection {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            statements: Vec::new(),
            rejected_prefixes: Vec::new(),
        }
    }

    pub fn reject_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.rejected_prefixes.push(prefix.into());
        self
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn take_statements(&mut self) -> Vec<String> {
        std::mem::take(&mut self.statements)
    }
}

impl SqlSyntax for RecordingConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl Connection for RecordingConnection {
    fn execute(&mut self, sql: &str) -> Result<(), ExecutionError> {
        if let Some(prefix) = self
            .rejected_prefixes
            .iter()
            .find(|p| sql.starts_with(p.as_str()))
        {
            return Err(ExecutionError::msg(format!(
                "statement rejected (matches '{}'): {}",
                prefix, sql
            )));
        }
        debug!("Recorded: {}", sql);
        self.statements.push(sql.to_string());
        Ok(())
    }
}
