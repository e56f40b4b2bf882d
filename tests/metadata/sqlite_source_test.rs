use entity_desc::metadata::{RelationKind, SqliteSource};
use entity_desc::MetadataReader;
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

const SCHEMA: &str = "
CREATE TABLE users (
    id INTEGER PRIMARY KEY,
    user_name VARCHAR(64) NOT NULL,
    email VARCHAR(255),
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE order_items (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id),
    status TEXT NOT NULL DEFAULT 'pending',
    quantity INTEGER DEFAULT 1,
    price DECIMAL(10,2)
);
";

fn create_database(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("shop.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    path
}

#[test]
fn test_tables_become_entities() {
    let dir = TempDir::new().unwrap();
    let reader = MetadataReader::from_source(SqliteSource::new(create_database(&dir)));

    assert_eq!(reader.table_names(), vec!["users", "order_items"]);

    let users = reader.find_by_entity_name("User").unwrap();
    assert_eq!(users.table_name, "users");

    let items = reader.find_by_table_name("order_items").unwrap();
    assert_eq!(items.entity_name, "OrderItem");
}

#[test]
fn test_columns_and_types() {
    let dir = TempDir::new().unwrap();
    let reader = MetadataReader::from_source(SqliteSource::new(create_database(&dir)));

    let users = reader.find_by_table_name("users").unwrap();
    let fields: Vec<_> = users.columns.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["id", "userName", "email", "createdAt"]);

    let id = users.column("id").unwrap();
    assert_eq!(id.type_name, "integer");
    assert!(id.is_primary_key);
    assert!(!id.nullable);

    let name = users.column("userName").unwrap();
    assert_eq!(name.column_name, "user_name");
    assert_eq!(name.type_name, "string");
    assert_eq!(name.length, Some(64));
    assert!(!name.nullable);

    let email = users.column("email").unwrap();
    assert_eq!(email.length, Some(255));
    assert!(email.nullable);

    let created = users.column("createdAt").unwrap();
    assert_eq!(created.type_name, "datetime");
    assert_eq!(created.default, Some(serde_json::json!("CURRENT_TIMESTAMP")));
}

#[test]
fn test_defaults_and_decimal() {
    let dir = TempDir::new().unwrap();
    let reader = MetadataReader::from_source(SqliteSource::new(create_database(&dir)));

    let items = reader.find_by_table_name("order_items").unwrap();
    assert_eq!(
        items.column("status").unwrap().default,
        Some(serde_json::json!("pending"))
    );
    assert_eq!(
        items.column("quantity").unwrap().default,
        Some(serde_json::json!(1))
    );
    assert_eq!(items.column("price").unwrap().type_name, "decimal");
}

#[test]
fn test_foreign_key_becomes_many_to_one() {
    let dir = TempDir::new().unwrap();
    let reader = MetadataReader::from_source(SqliteSource::new(create_database(&dir)));

    let items = reader.find_by_table_name("order_items").unwrap();
    let user = items.association("user").unwrap();

    assert_eq!(user.relation_kind, RelationKind::ManyToOne);
    assert_eq!(user.target_entity, "User");
    assert_eq!(user.target_table, "users");
}

#[test]
fn test_foreign_key_keeps_its_target_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("collide.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE user (id INTEGER PRIMARY KEY);
             CREATE TABLE users (id INTEGER PRIMARY KEY);
             CREATE TABLE orders (id INTEGER PRIMARY KEY, users_id INTEGER REFERENCES users(id));",
        )
        .unwrap();
    let reader = MetadataReader::from_source(SqliteSource::new(&path));

    assert_eq!(reader.find_by_table_name("user").unwrap().entity_name, "User");
    assert_eq!(reader.find_by_table_name("users").unwrap().entity_name, "Users");

    let orders = reader.find_by_table_name("orders").unwrap();
    let users = orders.association("users").unwrap();
    assert_eq!(users.target_entity, "Users");
    assert_eq!(users.target_table, "users");

    let markdown = entity_desc::Projector::default().to_markdown_full(&[orders]);
    assert!(markdown.contains("| users | 多对一 | `Users` | users |"));
}

#[test]
fn test_schema_changes_are_visible() {
    let dir = TempDir::new().unwrap();
    let path = create_database(&dir);
    let reader = MetadataReader::from_source(SqliteSource::new(&path));

    assert!(reader.find_by_table_name("audit_log").is_err());

    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE audit_log (id INTEGER PRIMARY KEY, message TEXT);")
        .unwrap();

    let audit = reader.find_by_table_name("audit_log").unwrap();
    assert_eq!(audit.entity_name, "AuditLog");
    assert_eq!(audit.columns.len(), 2);
}

#[test]
fn test_missing_database_is_empty() {
    let dir = TempDir::new().unwrap();
    let reader = MetadataReader::from_source(SqliteSource::new(dir.path().join("absent.db")));

    assert!(reader.all_entities().is_empty());
}
