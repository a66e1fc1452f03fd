//! Declarative table and constraint DDL generation
//!
//! Tables are declared through a [`schema::TableBuilder`], constraints are
//! rendered to dialect-specific clauses, and [`schema_ops::SchemaManager`] runs
//! the resulting statements through a [`db::Connection`].

pub mod commands;
pub mod config;
pub mod constants;
pub mod db;
pub mod dialect;
pub mod error;
pub mod migration;
pub mod naming;
pub mod render;
pub mod schema;
pub mod schema_ops;

pub use db::{Connection, DropTableOptions, RecordingConnection};
pub use dialect::{Dialect, SqlSyntax};
pub use error::{ExecutionError, SchemaError};
pub use schema_ops::{CreateTableOptions, SchemaManager};
