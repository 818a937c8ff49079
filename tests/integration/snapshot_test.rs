//! Snapshot client tests: read-only access, decoding and table previews.

use pretty_assertions::assert_eq;

use sqldrill::db::{self, Value};

use super::{seed_snapshot, USERS_SCHEMA};

#[tokio::test]
async fn test_execute_query_decodes_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let client = db::open_snapshot(&path).await.unwrap();
    let result = client
        .execute_query("SELECT id, name FROM users ORDER BY id")
        .await
        .unwrap();
    client.close().await.unwrap();

    assert_eq!(result.len(), 2);
    let first = &result.records()[0];
    assert_eq!(first.get("id"), Some(&Value::Int(1)));
    assert_eq!(first.get("name"), Some(&Value::Text("Alice".to_string())));

    let columns: Vec<&str> = first.columns().collect();
    assert_eq!(columns, vec!["id", "name"]);
}

#[tokio::test]
async fn test_expression_columns_use_result_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let client = db::open_snapshot(&path).await.unwrap();
    let result = client
        .execute_query("SELECT COUNT(*) AS n, AVG(total) AS avg_total FROM orders")
        .await
        .unwrap();
    client.close().await.unwrap();

    let row = &result.records()[0];
    assert_eq!(row.get("n"), Some(&Value::Int(2)));
    assert_eq!(row.get("avg_total"), Some(&Value::Float(14.75)));
}

#[tokio::test]
async fn test_empty_result_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let client = db::open_snapshot(&path).await.unwrap();
    let result = client
        .execute_query("SELECT * FROM users WHERE id = 999")
        .await
        .unwrap();
    client.close().await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_insert_fails_on_read_only_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let client = db::open_snapshot(&path).await.unwrap();
    let result = client
        .execute_query("INSERT INTO users (id, name) VALUES (3, 'Mallory')")
        .await;
    let count = client
        .execute_query("SELECT COUNT(*) AS n FROM users")
        .await
        .unwrap();
    client.close().await.unwrap();

    assert!(result.is_err());
    assert_eq!(count.records()[0].get("n"), Some(&Value::Int(2)));
}

#[tokio::test]
async fn test_list_tables_previews() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let client = db::open_snapshot(&path).await.unwrap();
    let previews = client.list_tables().await.unwrap();
    client.close().await.unwrap();

    let names: Vec<&str> = previews.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["orders", "users"]);

    let users = previews.iter().find(|p| p.name == "users").unwrap();
    assert_eq!(users.rows.len(), 2);
    assert_eq!(
        users.rows.records()[0].get("name"),
        Some(&Value::Text("Alice".to_string()))
    );
}
