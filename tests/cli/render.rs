//! `schemacraft render` end-to-end tests

use crate::helpers::cli::CliTestHelper;
use anyhow::Result;
use predicates::prelude::*;

const ORDERS: &str = r#"
steps:
  - action: create_table
    name: orders
    columns:
      - { name: sku, type: string, unique: true }
      - { name: amount, type: integer, check: "> 0" }
    references:
      - table: users
"#;

#[test]
fn test_render_prints_statements_from_migrations_dir() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.project.write_migration("001_orders.yaml", ORDERS)?;
    helper.project.write_migration(
        "002_drop.yml",
        "steps:\n  - action: drop_constraint\n    table: orders\n    unique: sku\n",
    )?;

    helper
        .command()
        .arg("render")
        .assert()
        .success()
        .stdout(
            "CREATE TABLE orders (id integer PRIMARY KEY, sku varchar(255), amount integer, \
             user_id integer NOT NULL, CONSTRAINT orders_sku_uq UNIQUE (sku), \
             CONSTRAINT orders_amount_check CHECK (amount > 0), \
             CONSTRAINT orders_user_id_fkey FOREIGN KEY (user_id) REFERENCES users (id));\n\
             ALTER TABLE orders DROP CONSTRAINT orders_sku_uq;\n",
        );

    Ok(())
}

#[test]
fn test_render_dialect_flag_overrides_config() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.project.write_config("dialect: postgres\n")?;
    helper.project.write_migration("001_orders.yaml", ORDERS)?;

    helper
        .command()
        .args(["render", "--dialect", "mysql"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CREATE TABLE `orders` (`id` int(11) AUTO_INCREMENT PRIMARY KEY",
        ))
        .stdout(predicate::str::contains(") ENGINE=InnoDB;"));

    Ok(())
}

#[test]
fn test_render_uses_config_dialect_and_conventions() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.project.write_config(
        "dialect: postgres\nconventions:\n  pluralize_table_names: false\n",
    )?;
    helper.project.write_migration(
        "001_posts.yaml",
        "steps:\n  - action: create_table\n    name: posts\n    references:\n      - table: people\n",
    )?;

    helper
        .command()
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"people_id\" integer NOT NULL"))
        .stdout(predicate::str::contains(
            "CONSTRAINT \"posts_people_id_fkey\" FOREIGN KEY (\"people_id\") REFERENCES \"people\" (\"id\")",
        ));

    Ok(())
}

#[test]
fn test_render_explicit_file_and_migrations_dir_flag() -> Result<()> {
    let helper = CliTestHelper::new()?;
    let other_dir = helper.project.root().join("db");
    std::fs::create_dir(&other_dir)?;
    std::fs::write(
        other_dir.join("001.yaml"),
        "steps:\n  - action: add_constraint\n    table: orders\n    check: amount\n    expression: \"< 1000\"\n    name: amount_cap\n",
    )?;

    helper
        .command()
        .args(["render", "--migrations-dir", "db"])
        .assert()
        .success()
        .stdout("ALTER TABLE orders ADD CONSTRAINT amount_cap CHECK (amount < 1000);\n");

    let file = helper.project.write_migration("only.yaml", ORDERS)?;
    helper
        .command()
        .arg("render")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("CREATE TABLE orders"));

    Ok(())
}
