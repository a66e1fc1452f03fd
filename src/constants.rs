// Configuration file name
pub const CONFIG_FILENAME: &str = "schemacraft.yaml";

// Default location of migration declaration files
pub const DEFAULT_MIGRATIONS_DIR: &str = "migrations";

// Environment fallback for the database URL
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

// Extensions recognized as migration declaration files
pub const MIGRATION_EXTENSIONS: &[&str] = &["yaml", "yml"];
