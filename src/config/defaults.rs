use crate::config::types::*;
use crate::constants::DEFAULT_MIGRATIONS_DIR;

// Config, Database and Conventions derive Default

impl Default for Directories {
    fn default() -> Self {
        Self {
            migrations: DEFAULT_MIGRATIONS_DIR.to_string(),
        }
    }
}
