//! Shared SQL rendering for constraint clauses and statements
//!
//! The table builder embeds these clauses in `CREATE TABLE`; the standalone
//! schema operations wrap them in `ALTER TABLE`. Both paths produce identical
//! clause text for the same constraint.

use crate::dialect::SqlSyntax;
use crate::naming::default_name;
use crate::schema::constraint::{ConstraintKind, ConstraintOptions};

/// Render a `CONSTRAINT <name> <definition>` clause.
///
/// The name is the explicit one if given, otherwise the default derived from the
/// table, columns and kind. Returns `None` when there is no definition to emit:
/// - CHECK constraints without an expression
/// - FOREIGN KEY constraints without a target
/// - an empty column list
///
/// A CHECK clause uses only the first column: `CHECK (<column> <expression>)`.
pub fn build_clause<S: AsRef<str>>(
    syntax: impl SqlSyntax,
    table: &str,
    columns: &[S],
    options: &ConstraintOptions,
) -> Option<String> {
    if columns.is_empty() {
        return None;
    }

    let name = options
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| default_name(table, options.kind(), columns));

    let quoted: Vec<String> = columns
        .iter()
        .map(|c| syntax.quote_identifier(c.as_ref()))
        .collect();
    let column_list = quoted.join(", ");

    let definition = match options {
        ConstraintOptions::Unique(_) => format!("UNIQUE ({})", column_list),
        ConstraintOptions::ForeignKey(fk) => {
            let target = fk.references.as_ref()?;
            let mut fk_def = format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                column_list,
                syntax.quote_identifier(target.table()),
                syntax.quote_identifier(target.column())
            );

            if fk.cascade == Some(true) {
                fk_def.push_str(" ON DELETE CASCADE");
            }
            if fk.deferrable == Some(true) {
                fk_def.push_str(" DEFERRABLE");
                if let Some(mode) = &fk.initially {
                    fk_def.push_str(&format!(" INITIALLY {}", mode));
                }
            }

            fk_def
        }
        ConstraintOptions::Check(check) => {
            let expression = check.expression.as_deref()?;
            format!("CHECK ({} {})", quoted[0], expression)
        }
    };

    Some(format!(
        "CONSTRAINT {} {}",
        syntax.quote_identifier(&name),
        definition
    ))
}

/// Render an `ALTER TABLE ... ADD <clause>` statement.
pub fn render_add_constraint(syntax: impl SqlSyntax, table: &str, clause: &str) -> String {
    format!("ALTER TABLE {} ADD {}", syntax.quote_identifier(table), clause)
}

/// Render the statement dropping a named constraint.
///
/// MySQL drops foreign keys with `DROP FOREIGN KEY`; everything else uses
/// `DROP CONSTRAINT`.
pub fn render_drop_constraint(
    syntax: impl SqlSyntax,
    table: &str,
    kind: ConstraintKind,
    name: &str,
) -> String {
    format!(
        "ALTER TABLE {} DROP {} {}",
        syntax.quote_identifier(table),
        syntax.dialect().drop_constraint_keyword(kind),
        syntax.quote_identifier(name)
    )
}
