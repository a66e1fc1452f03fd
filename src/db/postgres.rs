//! PostgreSQL execution layer backed by sqlx
//!
//! The schema layer is synchronous, so the connection owns a current-thread tokio
//! runtime and blocks on each statement.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::info;

use super::connection::Connection;
use super::error_context::StatementErrorContext;
use crate::dialect::{Dialect, SqlSyntax};
use crate::error::ExecutionError;

/// Mask password in database URL for display
pub fn mask_url_password(url: &str) -> String {
    let Some((protocol, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    if let Some((user_info, host_and_path)) = rest.split_once('@') {
        if let Some((username, _)) = user_info.split_once(':') {
            return format!("{}://{}:***@{}", protocol, username, host_and_path);
        }
    }

    url.to_string()
}

/// Database connection configuration
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Maximum number of retries for database connections
    pub max_retries: u32,
    /// Delay between connection retries
    pub retry_delay: Duration,
    pub acquire_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_delay: Duration::from_millis(200),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Connect with retries, for databases that may still be starting up.
async fn connect_with_retry(url: &str, config: &ConnectionConfig) -> Result<PgPool> {
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        // One connection keeps every statement in the same session.
        let result = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(config.acquire_timeout)
            .connect(url)
            .await;

        match result {
            Ok(pool) => {
                if attempt > 0 {
                    info!(
                        "Connected to database (after {} retr{})",
                        attempt,
                        if attempt == 1 { "y" } else { "ies" }
                    );
                } else {
                    info!("Connected to database");
                }
                return Ok(pool);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < config.max_retries {
                    if attempt == 0 {
                        info!("Database not ready, retrying...");
                    }
                    tokio::time::sleep(config.retry_delay).await;
                }
            }
        }
    }

    let cause = last_error.map(|e| e.to_string()).unwrap_or_default();
    Err(anyhow::anyhow!(
        "Failed to connect to database at {} after {} attempts: {}",
        mask_url_password(url),
        config.max_retries + 1,
        cause
    ))
}

pub struct PostgresConnection {
    runtime: Runtime,
    pool: PgPool,
}

impl PostgresConnection {
    pub fn connect(url: &str) -> Result<Self> {
        Self::connect_with_config(url, &ConnectionConfig::default())
    }

    pub fn connect_with_config(url: &str, config: &ConnectionConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime for database connection")?;
        let pool = runtime.block_on(connect_with_retry(url, config))?;

        runtime
            .block_on(sqlx::query("SET standard_conforming_strings = on").execute(&pool))
            .context("Failed to initialize database session")?;

        Ok(Self { runtime, pool })
    }
}

impl SqlSyntax for PostgresConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }
}

impl Connection for PostgresConnection {
    fn execute(&mut self, sql: &str) -> Result<(), ExecutionError> {
        let result = self.runtime.block_on(sqlx::raw_sql(sql).execute(&self.pool));
        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(ExecutionError::msg(
                StatementErrorContext::from_sqlx_error(&e).format(sql),
            )),
        }
    }
}

impl Drop for PostgresConnection {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}
