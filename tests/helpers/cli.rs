use crate::helpers::project::TestProject;
use anyhow::Result;
use assert_cmd::Command;

/// CLI test helper running the binary inside a temporary project
pub struct CliTestHelper {
    pub project: TestProject,
}

impl CliTestHelper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            project: TestProject::new()?,
        })
    }

    /// Command rooted in the project, isolated from the caller's environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("schemacraft").unwrap();
        cmd.current_dir(self.project.root())
            .env_remove("DATABASE_URL")
            .env_remove("RUST_LOG");
        cmd
    }
}
