//! Error types surfaced by the schema layer

use thiserror::Error;

/// Opaque failure reported by the execution layer.
///
/// The schema layer never inspects these; they are propagated to the caller unchanged.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ExecutionError(#[from] anyhow::Error);

impl ExecutionError {
    pub fn msg(message: impl std::fmt::Display) -> Self {
        Self(anyhow::anyhow!("{}", message))
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    /// A constraint kind outside unique / foreign_key / check was requested.
    #[error("unknown constraint type '{0}' (expected unique, foreign_key or check)")]
    UnknownConstraintType(String),

    /// A standalone add/drop request matched none of the known constraint shapes.
    #[error(
        "unrecognized constraint shape for table '{table}': expected one of unique, foreign_key or check"
    )]
    UnrecognizedConstraintShape { table: String },

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

pub type Result<T, E = SchemaError> = std::result::Result<T, E>;
