//! Default constraint naming
//!
//! Names are derived purely from the table, the constrained columns and the
//! constraint kind, so a constraint created without an explicit name can later be
//! dropped by describing it the same way.

use crate::schema::constraint::ConstraintKind;

/// `{table}_{col1_col2..}_{suffix}` where the suffix is `uq`, `fkey` or `check`.
pub fn default_name<S: AsRef<str>>(table: &str, kind: ConstraintKind, columns: &[S]) -> String {
    let joined = columns
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}_{}", table, joined, kind.suffix())
}
