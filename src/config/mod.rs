pub mod builder;
pub mod defaults;
pub mod merge;
pub mod types;


pub use builder::ConfigBuilder;
pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Main configuration loading function
///
/// Returns the file's settings and the directory relative paths resolve against.
/// A missing file is not an error: every setting has a default.
pub fn load_config(config_file: &str) -> Result<(ConfigInput, PathBuf)> {
    let path = Path::new(config_file);
    let config_dir = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let config_input = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", config_file))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_file))?
    } else {
        ConfigInput::default()
    };

    Ok((config_input, config_dir))
}
