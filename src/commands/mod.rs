pub mod apply;
pub mod render;

// Re-export all command functions
pub use apply::cmd_apply;
pub use render::{cmd_render, render_statements};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::db::Connection;
use crate::migration::{apply_migration, discover_migration_files, load_migration_file};
use crate::schema_ops::SchemaManager;

/// Files named on the command line, or every declaration file in the migrations directory.
pub fn resolve_migration_files(
    config: &Config,
    root_dir: &Path,
    files: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    if !files.is_empty() {
        return Ok(files.to_vec());
    }

    let migrations_dir = root_dir.join(&config.directories.migrations);
    let files = discover_migration_files(&migrations_dir)?;
    if files.is_empty() {
        anyhow::bail!(
            "No migration files found in {}",
            migrations_dir.display()
        );
    }
    Ok(files)
}

/// Apply each file in order, stopping at the first failure.
pub fn run_migration_files<C: Connection>(
    manager: &mut SchemaManager<C>,
    files: &[PathBuf],
) -> Result<()> {
    for path in files {
        debug!("Loading {}", path.display());
        let migration = load_migration_file(path)?;
        apply_migration(manager, &migration)
            .with_context(|| format!("Failed to apply {}", path.display()))?;
    }
    Ok(())
}
