use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{resolve_migration_files, run_migration_files};
use crate::config::Config;
use crate::db::postgres::{PostgresConnection, mask_url_password};
use crate::dialect::Dialect;
use crate::schema_ops::SchemaManager;

/// Execute migration files against a PostgreSQL database.
pub fn cmd_apply(config: &Config, root_dir: &Path, files: &[PathBuf]) -> Result<()> {
    if !matches!(config.dialect, Dialect::Postgres | Dialect::Generic) {
        bail!(
            "Cannot apply migrations for the {:?} dialect: only PostgreSQL is supported",
            config.dialect
        );
    }

    let Some(url) = config.database.url.as_deref() else {
        bail!("No database URL configured. Use --database-url or set DATABASE_URL");
    };

    let files = resolve_migration_files(config, root_dir, files)?;

    info!("Connecting to {}", mask_url_password(url));
    let connection = PostgresConnection::connect(url)?;
    let mut manager = SchemaManager::with_conventions(connection, config.conventions.clone());

    run_migration_files(&mut manager, &files)?;
    info!("Applied {} migration file(s)", files.len());
    Ok(())
}
