//! `schemacraft apply` checks that run before any database is contacted

use crate::helpers::cli::CliTestHelper;
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_apply_without_database_url_fails() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.project.write_config("dialect: postgres\n")?;

    helper
        .command()
        .arg("apply")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database URL configured"));

    Ok(())
}

#[test]
fn test_apply_refuses_mysql_dialect() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.project.write_config("dialect: mysql\n")?;

    helper
        .command()
        .args(["apply", "--database-url", "postgres://localhost/app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only PostgreSQL is supported"));

    Ok(())
}
