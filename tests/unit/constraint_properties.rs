//! Constraint generation behavior through the public API

use rstest::rstest;
use schemacraft::error::SchemaError;
use schemacraft::render::sql::build_clause;
use schemacraft::schema::{
    ColumnOptions, ColumnType, ConstraintKind, ConstraintOptions, ConstraintShape, Conventions,
    ForeignKeyOptions, TableBuilder,
};
use schemacraft::{
    Connection, CreateTableOptions, Dialect, ExecutionError, RecordingConnection, SchemaManager,
    SqlSyntax,
};

fn table(name: &str) -> TableBuilder {
    TableBuilder::new(name, Dialect::Generic, Conventions::default())
}

#[test]
fn test_unnamed_unique_gets_default_name() {
    let mut t = table("accounts");
    t.string("email", ColumnOptions::new().unique());

    assert_eq!(
        t.to_sql(),
        "email varchar(255), CONSTRAINT accounts_email_uq UNIQUE (email)"
    );
}

#[rstest]
#[case(ConstraintOptions::unique().named("custom"), "CONSTRAINT custom UNIQUE (code)")]
#[case(
    ConstraintOptions::foreign_key("regions").named("custom"),
    "CONSTRAINT custom FOREIGN KEY (code) REFERENCES regions (id)"
)]
#[case(ConstraintOptions::check("<> ''").named("custom"), "CONSTRAINT custom CHECK (code <> '')")]
fn test_explicit_name_used_verbatim(#[case] options: ConstraintOptions, #[case] expected: &str) {
    assert_eq!(
        build_clause(Dialect::Generic, "items", &["code"], &options).as_deref(),
        Some(expected)
    );
}

#[test]
fn test_same_explicit_name_merges_into_one_record() {
    let mut t = table("shipments");
    t.integer("carrier_id", ColumnOptions::new());
    t.constraint(
        ["carrier_id"],
        ForeignKeyOptions::new("carriers").named("shipments_carrier"),
    );
    t.constraint(
        ["carrier_id"],
        ForeignKeyOptions::new("carriers")
            .named("shipments_carrier")
            .cascade(true),
    );

    assert_eq!(t.constraints().len(), 1);
    assert_eq!(
        t.to_sql(),
        "carrier_id integer, CONSTRAINT shipments_carrier FOREIGN KEY (carrier_id) REFERENCES carriers (id) ON DELETE CASCADE"
    );
}

#[test]
fn test_foreign_key_with_every_option() {
    let options = ForeignKeyOptions::new("other")
        .cascade(true)
        .deferrable(true)
        .initially("DEFERRED");

    assert_eq!(
        build_clause(Dialect::Generic, "t", &["c"], &options.into()).as_deref(),
        Some(
            "CONSTRAINT t_c_fkey FOREIGN KEY (c) REFERENCES other (id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED"
        )
    );
}

#[test]
fn test_check_on_orders_amount() {
    let mut t = table("orders");
    t.integer("amount", ColumnOptions::new().check("> 0"));

    assert_eq!(
        t.to_sql(),
        "amount integer, CONSTRAINT orders_amount_check CHECK (amount > 0)"
    );
}

#[test]
fn test_check_without_expression_is_left_out() {
    let mut t = table("orders");
    t.integer("amount", ColumnOptions::new());
    t.constraint(["amount"], schemacraft::schema::CheckOptions::default());

    assert_eq!(t.constraints().len(), 1);
    assert_eq!(t.to_sql(), "amount integer");
}

#[test]
fn test_column_with_references_adds_foreign_key() {
    let mut t = table("orders");
    t.column(
        "user_id",
        ColumnType::Integer,
        ColumnOptions::new().references("users"),
    );

    assert_eq!(
        t.to_sql(),
        "user_id integer, CONSTRAINT orders_user_id_fkey FOREIGN KEY (user_id) REFERENCES users (id)"
    );
}

#[test]
fn test_drop_unique_recomputes_default_name() {
    let mut manager = SchemaManager::new(RecordingConnection::new(Dialect::Generic));
    manager
        .drop_constraint("orders", &ConstraintShape::unique("sku"))
        .unwrap();

    assert_eq!(
        manager.connection().statements(),
        ["ALTER TABLE orders DROP CONSTRAINT orders_sku_uq"]
    );
}

#[test]
fn test_exclusion_kind_is_unknown() {
    let err = "exclusion".parse::<ConstraintKind>().unwrap_err();
    assert!(matches!(err, SchemaError::UnknownConstraintType(ref kind) if kind == "exclusion"));

    let mut manager = SchemaManager::new(RecordingConnection::new(Dialect::Generic));
    let shape = ConstraintShape {
        kind: Some("exclusion".to_string()),
        columns: Some("period".into()),
        ..ConstraintShape::default()
    };
    let err = manager.add_constraint("bookings", &shape).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownConstraintType(_)));
    assert!(manager.connection().statements().is_empty());
}

#[test]
fn test_fragments_are_columns_then_constraints_in_order() {
    let mut t = table("line_items");
    t.integer("order_id", ColumnOptions::new().references("orders"))
        .integer("quantity", ColumnOptions::new().check("> 0"))
        .string("sku", ColumnOptions::new().limit(40).unique());
    t.constraint(["order_id", "sku"], ConstraintOptions::unique());
    t.constraint(["sku"], schemacraft::schema::CheckOptions::default());

    let sql = t.to_sql();
    let constraint_fragments = sql.matches("CONSTRAINT ").count();

    assert_eq!(t.columns().len(), 3);
    assert_eq!(t.constraints().len(), 5);
    assert_eq!(constraint_fragments, 4);
    assert_eq!(
        sql,
        "order_id integer, quantity integer, sku varchar(40), \
         CONSTRAINT line_items_order_id_fkey FOREIGN KEY (order_id) REFERENCES orders (id), \
         CONSTRAINT line_items_quantity_check CHECK (quantity > 0), \
         CONSTRAINT line_items_sku_uq UNIQUE (sku), \
         CONSTRAINT line_items_order_id_sku_uq UNIQUE (order_id, sku)"
    );
}

#[test]
fn test_add_then_create_produce_identical_clause() {
    let mut manager = SchemaManager::new(RecordingConnection::new(Dialect::Postgres));
    manager
        .create_table("orders", &CreateTableOptions::default(), |t| {
            t.integer("amount", ColumnOptions::new().check("> 0"));
        })
        .unwrap();
    manager
        .add_constraint("orders", &ConstraintShape::check("amount", "> 0"))
        .unwrap();

    let statements = manager.connection().statements();
    let clause = "CONSTRAINT \"orders_amount_check\" CHECK (\"amount\" > 0)";
    assert!(statements[0].contains(clause));
    assert_eq!(
        statements[1],
        format!("ALTER TABLE \"orders\" ADD {}", clause)
    );
}

/// Uppercases identifiers and gives strings a 32 character default.
struct ShoutingConnection(RecordingConnection);

impl SqlSyntax for ShoutingConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn quote_identifier(&self, name: &str) -> String {
        name.to_uppercase()
    }

    fn default_limit_for_type(&self, column_type: &ColumnType) -> Option<u32> {
        (*column_type == ColumnType::String).then_some(32)
    }
}

impl Connection for ShoutingConnection {
    fn execute(&mut self, sql: &str) -> Result<(), ExecutionError> {
        self.0.execute(sql)
    }
}

#[test]
fn test_connection_syntax_overrides_reach_every_statement() {
    let mut manager = SchemaManager::new(ShoutingConnection(RecordingConnection::new(
        Dialect::Postgres,
    )));
    manager
        .create_table("orders", &CreateTableOptions::default(), |t| {
            t.string("sku", ColumnOptions::new().unique());
        })
        .unwrap();
    manager
        .drop_constraint("orders", &ConstraintShape::unique("sku"))
        .unwrap();

    assert_eq!(
        manager.connection().0.statements(),
        [
            "CREATE TABLE ORDERS (ID serial PRIMARY KEY, SKU character varying(32), \
             CONSTRAINT ORDERS_SKU_UQ UNIQUE (SKU))",
            "ALTER TABLE ORDERS DROP CONSTRAINT ORDERS_SKU_UQ",
        ]
    );
}
