//! CLI error handling tests
//!
//! The negative paths: what the user sees when a declaration or config is wrong.

use crate::helpers::cli::CliTestHelper;
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_unknown_constraint_type_error() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.project.write_migration(
        "001_bad.yaml",
        "steps:\n  - action: add_constraint\n    table: bookings\n    type: exclusion\n    columns: [period]\n",
    )?;

    helper
        .command()
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown constraint type 'exclusion'"))
        .stderr(predicate::str::contains("001_bad.yaml"));

    Ok(())
}

#[test]
fn test_unrecognized_constraint_shape_error() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.project.write_migration(
        "001_bad.yaml",
        "steps:\n  - action: drop_constraint\n    table: orders\n    name: orphan\n",
    )?;

    helper
        .command()
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "unrecognized constraint shape for table 'orders'",
        ));

    Ok(())
}

#[test]
fn test_invalid_migration_yaml_error() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper
        .project
        .write_migration("001_broken.yaml", "steps: [unbalanced")?;

    helper
        .command()
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse migration file"));

    Ok(())
}

#[test]
fn test_invalid_config_yaml_error() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper
        .project
        .write_config("invalid: yaml: content: [unbalanced")?;

    helper
        .command()
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));

    Ok(())
}

#[test]
fn test_empty_migrations_dir_error() -> Result<()> {
    let helper = CliTestHelper::new()?;

    helper
        .command()
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No migration files found"));

    Ok(())
}

#[test]
fn test_unknown_dialect_flag_rejected() -> Result<()> {
    let helper = CliTestHelper::new()?;

    helper
        .command()
        .args(["render", "--dialect", "oracle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'oracle'"));

    Ok(())
}
