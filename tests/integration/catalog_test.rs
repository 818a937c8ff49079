//! Catalog tests: questions file loading and grading through the catalog.

use std::collections::HashMap;

use pretty_assertions::assert_eq;

use sqldrill::catalog::Catalog;
use sqldrill::grade::{grade, GradeOptions};

use super::{seed_snapshot, USERS_SCHEMA};

const QUESTIONS_JSON: &str = r#"{
    "db1.sqlite": [
        {
            "id": 1,
            "title": "Select all users",
            "solution": "SELECT id, name FROM users ORDER BY id",
            "starter_sql": "SELECT ... FROM users;"
        }
    ]
}"#;

#[tokio::test]
async fn test_grade_through_catalog_question() {
    let dir = tempfile::tempdir().unwrap();
    seed_snapshot(dir.path(), "db1.sqlite", USERS_SCHEMA).await;

    let questions_path = dir.path().join("questions.json");
    std::fs::write(&questions_path, QUESTIONS_JSON).unwrap();

    let catalog = Catalog::load(dir.path(), &questions_path, HashMap::new()).unwrap();

    let snapshots = catalog.snapshots().unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].file, "db1.sqlite");

    let question = catalog.question("db1.sqlite", 1).unwrap();
    let path = catalog.snapshot_path("db1.sqlite").unwrap();

    let outcome = grade(
        &path,
        &question.solution,
        "SELECT id, name FROM users ORDER BY id",
        &GradeOptions::default(),
    )
    .await
    .unwrap();

    assert!(outcome.is_correct());
}

#[tokio::test]
async fn test_unknown_snapshot_path_still_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let questions_path = dir.path().join("questions.json");
    std::fs::write(&questions_path, QUESTIONS_JSON).unwrap();

    let catalog = Catalog::load(dir.path(), &questions_path, HashMap::new()).unwrap();

    // The path resolves but the file does not exist; grading reports it as a
    // configuration error.
    let path = catalog.snapshot_path("db9.sqlite").unwrap();
    let result = grade(&path, "SELECT 1", "SELECT 1", &GradeOptions::default()).await;
    assert!(result.is_err());
}
