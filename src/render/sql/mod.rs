//! Shared SQL rendering functions
//!
//! Both the table builder and the standalone schema operations go through these
//! functions so a constraint renders identically whichever path created it.

pub mod constraint;
pub mod table;

pub use constraint::{build_clause, render_add_constraint, render_drop_constraint};
pub use table::{render_column_definition, render_create_table, render_drop_table};
