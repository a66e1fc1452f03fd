use clap::Args;
use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::schema::Conventions;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub database: Option<DatabaseInput>,
    pub dialect: Option<Dialect>,
    pub directories: Option<DirectoriesInput>,
    pub conventions: Option<ConventionsInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database: Database,
    pub dialect: Dialect,
    pub directories: Directories,
    pub conventions: Conventions,
}

// Database configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseInput {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Database {
    /// Only required by commands that execute statements.
    pub url: Option<String>,
}

// Directory configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectoriesInput {
    pub migrations_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Directories {
    pub migrations: String,
}

// Naming conventions
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConventionsInput {
    pub pluralize_table_names: Option<bool>,
}

// CLI argument groups for command-specific options
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    #[arg(long, help = "Database URL (falls back to DATABASE_URL)")]
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DirectoryArgs {
    #[arg(long, help = "Migrations directory path")]
    pub migrations_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DialectArgs {
    #[arg(long, value_enum, help = "SQL dialect to render")]
    pub dialect: Option<Dialect>,
}

// Conversion functions from CLI args to config input
impl From<DatabaseArgs> for DatabaseInput {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            url: args.database_url,
        }
    }
}

impl From<DirectoryArgs> for DirectoriesInput {
    fn from(args: DirectoryArgs) -> Self {
        Self {
            migrations_dir: args.migrations_dir,
        }
    }
}
