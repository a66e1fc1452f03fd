//! Shared SQL rendering for column definitions and table statements

use crate::dialect::SqlSyntax;
use crate::schema::column::{ColumnDefinition, ColumnType};

/// Render a single column definition.
///
/// Handles:
/// - the dialect's native type name, with `(limit)` or `(precision, scale)`
/// - DEFAULT values
/// - NOT NULL when the column was declared non-null
pub fn render_column_definition(syntax: impl SqlSyntax, column: &ColumnDefinition) -> String {
    let dialect = syntax.dialect();
    let mut col_def = format!(
        "{} {}",
        syntax.quote_identifier(&column.name),
        dialect.type_name(&column.column_type)
    );

    if column.column_type != ColumnType::PrimaryKey {
        match (column.precision, column.scale, column.limit) {
            (Some(precision), Some(scale), _) => {
                col_def.push_str(&format!("({}, {})", precision, scale))
            }
            (Some(precision), None, _) => col_def.push_str(&format!("({})", precision)),
            (None, _, Some(limit)) => col_def.push_str(&format!("({})", limit)),
            (None, _, None) => {}
        }
    }

    if let Some(ref default) = column.default {
        col_def.push_str(&format!(" DEFAULT {}", default.to_sql(dialect)));
    }

    if column.null == Some(false) && column.column_type != ColumnType::PrimaryKey {
        col_def.push_str(" NOT NULL");
    }

    col_def
}

/// Render a `CREATE TABLE` statement around an already-rendered body.
pub fn render_create_table(
    syntax: impl SqlSyntax,
    table: &str,
    body: &str,
    temporary: bool,
    table_options: Option<&str>,
) -> String {
    let mut sql = String::from("CREATE ");
    if temporary {
        sql.push_str("TEMPORARY ");
    }
    sql.push_str(&format!("TABLE {} ({})", syntax.quote_identifier(table), body));

    if let Some(options) = table_options.filter(|o| !o.trim().is_empty()) {
        sql.push(' ');
        sql.push_str(options.trim());
    }

    sql
}

pub fn render_drop_table(
    syntax: impl SqlSyntax,
    table: &str,
    if_exists: bool,
    cascade: bool,
) -> String {
    let mut sql = String::from("DROP TABLE ");
    if if_exists {
        sql.push_str("IF EXISTS ");
    }
    sql.push_str(&syntax.quote_identifier(table));
    if cascade {
        sql.push_str(" CASCADE");
    }
    sql
}
