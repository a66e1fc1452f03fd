//! Declaration files applied through the library, without the binary

use crate::helpers::project::TestProject;
use anyhow::Result;
use schemacraft::commands::render_statements;
use schemacraft::config::Config;
use schemacraft::migration::{apply_migration, discover_migration_files, load_migration_file};
use schemacraft::{Dialect, RecordingConnection, SchemaManager};

#[test]
fn test_files_apply_in_name_order() -> Result<()> {
    let project = TestProject::new()?;
    project.write_migration(
        "002_orders.yaml",
        r#"
steps:
  - action: create_table
    name: orders
    references:
      - table: customers
"#,
    )?;
    project.write_migration(
        "001_customers.yml",
        r#"
steps:
  - action: create_table
    name: customers
    columns:
      - { name: email, type: string, limit: 120, nullable: false, unique: true }
"#,
    )?;

    let files = discover_migration_files(&project.migrations_dir())?;
    let mut manager = SchemaManager::new(RecordingConnection::new(Dialect::Generic));
    for file in &files {
        apply_migration(&mut manager, &load_migration_file(file)?)?;
    }

    let statements = manager.connection().statements();
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[0],
        "CREATE TABLE customers (id integer PRIMARY KEY, email varchar(120) NOT NULL, CONSTRAINT customers_email_uq UNIQUE (email))"
    );
    assert_eq!(
        statements[1],
        "CREATE TABLE orders (id integer PRIMARY KEY, customer_id integer NOT NULL, CONSTRAINT orders_customer_id_fkey FOREIGN KEY (customer_id) REFERENCES customers (id))"
    );

    Ok(())
}

#[test]
fn test_mysql_rendering_of_a_full_migration() -> Result<()> {
    let project = TestProject::new()?;
    project.write_migration(
        "001_schema.yaml",
        r#"
steps:
  - action: create_table
    name: people
    columns:
      - { name: nickname, type: string, default: anonymous }
      - { name: active, type: boolean, default: true }
  - action: add_constraint
    table: posts
    foreign_key: author_id
    references: { table: people, column: id }
    name: posts_author
    deferrable: true
    initially: IMMEDIATE
  - action: drop_constraint
    table: posts
    foreign_key: author_id
    name: posts_author
"#,
    )?;

    let config = Config {
        dialect: Dialect::Mysql,
        ..Config::default()
    };
    let statements = render_statements(&config, project.root(), &[])?;

    insta::assert_snapshot!(statements.join(";\n"), @r"
    CREATE TABLE `people` (`id` int(11) AUTO_INCREMENT PRIMARY KEY, `nickname` varchar(255) DEFAULT 'anonymous', `active` tinyint(1) DEFAULT 1) ENGINE=InnoDB;
    ALTER TABLE `posts` ADD CONSTRAINT `posts_author` FOREIGN KEY (`author_id`) REFERENCES `people` (`id`) DEFERRABLE INITIALLY IMMEDIATE;
    ALTER TABLE `posts` DROP FOREIGN KEY `posts_author`
    ");

    Ok(())
}
