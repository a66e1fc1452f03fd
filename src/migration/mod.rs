//! Declarative migration files
//!
//! A migration file is a YAML document listing schema steps:
//!
//! ```yaml
//! steps:
//!   - action: create_table
//!     name: orders
//!     columns:
//!       - { name: sku, type: string, unique: true }
//!       - { name: amount, type: integer, check: "> 0" }
//!     references:
//!       - table: users
//!   - action: add_constraint
//!     table: orders
//!     foreign_key: user_id
//!     references: users
//!     cascade: true
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::MIGRATION_EXTENSIONS;
use crate::db::Connection;
use crate::error::SchemaError;
use crate::schema::{ColumnOptions, ColumnType, ConstraintShape};
use crate::schema_ops::{CreateTableOptions, SchemaManager};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MigrationFile {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    CreateTable(CreateTableStep),
    AddConstraint(ConstraintStep),
    DropConstraint(ConstraintStep),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTableStep {
    pub name: String,
    #[serde(flatten)]
    pub options: CreateTableOptions,
    #[serde(default)]
    pub columns: Vec<ColumnDeclaration>,
    #[serde(default)]
    pub references: Vec<ReferenceDeclaration>,
    #[serde(default)]
    pub timestamps: bool,
    #[serde(default)]
    pub constraints: Vec<ConstraintShape>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(flatten)]
    pub options: ColumnOptions,
}

/// A `<singular>_id` column pointing at `table`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceDeclaration {
    pub table: String,
    #[serde(flatten)]
    pub options: ColumnOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstraintStep {
    pub table: String,
    #[serde(flatten)]
    pub shape: ConstraintShape,
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Step::CreateTable(step) => format!("create table {}", step.name),
            Step::AddConstraint(step) => format!("add constraint on {}", step.table),
            Step::DropConstraint(step) => format!("drop constraint on {}", step.table),
        }
    }
}

pub fn parse_migration(contents: &str) -> Result<MigrationFile> {
    Ok(serde_yaml::from_str(contents)?)
}

pub fn load_migration_file(path: &Path) -> Result<MigrationFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read migration file {}", path.display()))?;
    parse_migration(&contents)
        .with_context(|| format!("Failed to parse migration file {}", path.display()))
}

/// Find all `.yaml` / `.yml` files in a directory, sorted by file name
pub fn discover_migration_files(migrations_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !migrations_dir.exists() {
        return Ok(files);
    }

    for extension in MIGRATION_EXTENSIONS {
        let pattern = migrations_dir.join(format!("*.{}", extension));
        let pattern = pattern.to_string_lossy();
        for entry in glob::glob(&pattern)
            .with_context(|| format!("Invalid migrations directory {}", migrations_dir.display()))?
        {
            let path = entry?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Run every step of a migration file, stopping at the first failure.
pub fn apply_migration<C: Connection>(
    manager: &mut SchemaManager<C>,
    migration: &MigrationFile,
) -> Result<(), SchemaError> {
    for step in &migration.steps {
        debug!("Applying step: {}", step.describe());
        match step {
            Step::CreateTable(step) => create_table(manager, step)?,
            Step::AddConstraint(step) => manager.add_constraint(&step.table, &step.shape)?,
            Step::DropConstraint(step) => manager.drop_constraint(&step.table, &step.shape)?,
        }
    }
    Ok(())
}

fn create_table<C: Connection>(
    manager: &mut SchemaManager<C>,
    step: &CreateTableStep,
) -> Result<(), SchemaError> {
    // Shapes are resolved up front: the declaration closure cannot fail.
    let constraints = step
        .constraints
        .iter()
        .map(|shape| shape.resolve(&step.name))
        .collect::<Result<Vec<_>, _>>()?;

    let skipped = manager.create_table(&step.name, &step.options, |t| {
        for column in &step.columns {
            t.column(&column.name, column.column_type.clone(), column.options.clone());
        }
        for reference in &step.references {
            t.reference(&reference.table, reference.options.clone());
        }
        if step.timestamps {
            t.timestamps();
        }
        for (columns, options) in constraints {
            t.constraint(&columns, options);
        }
    })?;

    if skipped > 0 {
        warn!(
            "{} constraint(s) on {} referenced unknown columns and were skipped",
            skipped, step.name
        );
    } else {
        info!("Created table {}", step.name);
    }
    Ok(())
}
