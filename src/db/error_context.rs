//! Readable context for statements PostgreSQL rejected

use sqlx::postgres::{PgDatabaseError, PgErrorPosition};

#[derive(Debug, Clone)]
pub struct StatementErrorContext {
    pub message: String,
    /// Character position in the statement (1-indexed)
    pub position: Option<usize>,
    pub detail: Option<String>,
    pub hint: Option<String>,
    /// SQLSTATE, e.g. "42P01" for undefined_table
    pub code: Option<String>,
}

impl StatementErrorContext {
    pub fn from_sqlx_error(error: &sqlx::Error) -> Self {
        if let Some(db_error) = error.as_database_error()
            && let Some(pg_error) = db_error.try_downcast_ref::<PgDatabaseError>()
        {
            let position = pg_error.position().map(|pos| match pos {
                PgErrorPosition::Original(p) => p,
                PgErrorPosition::Internal { position, .. } => position,
            });

            return Self {
                message: pg_error.message().to_string(),
                position,
                detail: pg_error.detail().map(|s| s.to_string()),
                hint: pg_error.hint().map(|s| s.to_string()),
                code: Some(pg_error.code().to_string()),
            };
        }

        Self::message_only(error.to_string())
    }

    fn message_only(message: String) -> Self {
        Self {
            message,
            position: None,
            detail: None,
            hint: None,
            code: None,
        }
    }

    pub fn format(&self, sql: &str) -> String {
        let mut msg = match &self.code {
            Some(code) => format!("Failed to execute statement ({}): {}", code, self.message),
            None => format!("Failed to execute statement: {}", self.message),
        };

        if let Some(detail) = &self.detail {
            msg.push_str(&format!("\n  Detail: {}", detail));
        }
        if let Some(hint) = &self.hint {
            msg.push_str(&format!("\n  Hint: {}", hint));
        }

        msg.push_str(&format!("\n\n  {}", sql));
        if let Some(position) = self.position {
            msg.push_str(&format!("\n  {}", position_marker(sql, position)));
        }

        msg
    }
}

/// Caret under the 1-indexed character `position` of a single-line statement
pub fn position_marker(sql: &str, position: usize) -> String {
    let offset = position.saturating_sub(1).min(sql.chars().count());
    format!("{}^", " ".repeat(offset))
}
