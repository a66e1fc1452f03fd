use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{resolve_migration_files, run_migration_files};
use crate::config::Config;
use crate::db::RecordingConnection;
use crate::schema_ops::SchemaManager;

/// Run migration files against a recording connection and collect the statements.
pub fn render_statements(
    config: &Config,
    root_dir: &Path,
    files: &[PathBuf],
) -> Result<Vec<String>> {
    let files = resolve_migration_files(config, root_dir, files)?;
    info!(
        "Rendering {} file(s) for the {:?} dialect",
        files.len(),
        config.dialect
    );

    let connection = RecordingConnection::new(config.dialect);
    let mut manager = SchemaManager::with_conventions(connection, config.conventions.clone());
    run_migration_files(&mut manager, &files)?;

    Ok(manager.into_connection().take_statements())
}

/// Print the DDL the migration files would run, one statement per line.
pub fn cmd_render(config: &Config, root_dir: &Path, files: &[PathBuf]) -> Result<()> {
    for statement in render_statements(config, root_dir, files)? {
        println!("{};", statement);
    }
    Ok(())
}
