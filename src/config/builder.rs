use crate::config::{merge::Merge, types::*};
use crate::constants::DATABASE_URL_ENV;
use crate::schema::Conventions;

pub struct ConfigBuilder {
    config_input: ConfigInput,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    pub fn resolve(self) -> Config {
        let defaults = Config::default();

        Config {
            database: self.resolve_database(&defaults.database),
            dialect: self.config_input.dialect.unwrap_or(defaults.dialect),
            directories: self.resolve_directories(&defaults.directories),
            conventions: self.resolve_conventions(&defaults.conventions),
        }
    }

    fn resolve_database(&self, defaults: &Database) -> Database {
        let db_input = self.config_input.database.as_ref();

        let url = db_input
            .and_then(|d| d.url.as_ref())
            .cloned()
            .or_else(|| std::env::var(DATABASE_URL_ENV).ok())
            .or_else(|| defaults.url.clone());

        Database { url }
    }

    fn resolve_directories(&self, defaults: &Directories) -> Directories {
        let dir_input = self.config_input.directories.as_ref();

        Directories {
            migrations: dir_input
                .and_then(|d| d.migrations_dir.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.migrations.clone()),
        }
    }

    fn resolve_conventions(&self, defaults: &Conventions) -> Conventions {
        let conventions_input = self.config_input.conventions.as_ref();

        Conventions {
            pluralize_table_names: conventions_input
                .and_then(|c| c.pluralize_table_names)
                .unwrap_or(defaults.pluralize_table_names),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
