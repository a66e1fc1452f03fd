//! In-memory model of a table under construction and its constraints

pub mod column;
pub mod constraint;
pub mod inflect;
pub mod table;

pub use column::{
    ColumnDefinition, ColumnOptions, ColumnType, DefaultValue, ReferenceDetails, ReferencesOption,
};
pub use constraint::{
    CheckOptions, ColumnList, ConstraintDefinition, ConstraintKind, ConstraintOptions,
    ConstraintShape, ForeignKeyOptions, Reference, UniqueOptions,
};
pub use inflect::Conventions;
pub use table::{ColumnId, ColumnRef, TableBuilder};
