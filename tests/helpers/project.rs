use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary project directory with a config file and a migrations directory
pub struct TestProject {
    pub temp_dir: TempDir,
    pub project_root: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().to_path_buf();
        fs::create_dir_all(project_root.join("migrations"))?;

        Ok(Self {
            temp_dir,
            project_root,
        })
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(self.project_root.join("schemacraft.yaml"), content)?;
        Ok(())
    }

    pub fn write_migration(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.migrations_dir().join(filename);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn migrations_dir(&self) -> PathBuf {
        self.project_root.join("migrations")
    }

    pub fn root(&self) -> &Path {
        &self.project_root
    }
}
