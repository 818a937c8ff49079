//! End-to-end grading tests against real snapshot files.

use pretty_assertions::assert_eq;

use sqldrill::db::Value;
use sqldrill::error::DrillError;
use sqldrill::grade::{grade, CheckOptions, GradeOptions, GradeOutcome};

use super::{seed_snapshot, USERS_SCHEMA};

const REFERENCE: &str = "SELECT id, name FROM users ORDER BY id";

#[tokio::test]
async fn test_identical_queries_are_correct() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let outcome = grade(&path, REFERENCE, REFERENCE, &GradeOptions::default())
        .await
        .unwrap();

    assert!(outcome.is_correct());
}

#[tokio::test]
async fn test_equivalent_query_is_correct() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let outcome = grade(
        &path,
        REFERENCE,
        "SELECT id, name FROM users WHERE id > 0 ORDER BY id",
        &GradeOptions::default(),
    )
    .await
    .unwrap();

    assert!(outcome.is_correct());
}

#[tokio::test]
async fn test_reordered_rows_are_incorrect_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let outcome = grade(
        &path,
        REFERENCE,
        "SELECT id, name FROM users ORDER BY id DESC",
        &GradeOptions::default(),
    )
    .await
    .unwrap();

    match outcome {
        GradeOutcome::Graded { correct, .. } => assert!(!correct),
        other => panic!("expected Graded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reordered_rows_pass_with_ignore_row_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let options = GradeOptions {
        check: CheckOptions {
            ignore_row_order: true,
            ..Default::default()
        },
    };
    let outcome = grade(
        &path,
        REFERENCE,
        "SELECT id, name FROM users ORDER BY id DESC",
        &options,
    )
    .await
    .unwrap();

    assert!(outcome.is_correct());
}

#[tokio::test]
async fn test_candidate_against_missing_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let outcome = grade(
        &path,
        REFERENCE,
        "SELECT * FROM nosuchtable",
        &GradeOptions::default(),
    )
    .await
    .unwrap();

    match outcome {
        GradeOutcome::CandidateQueryFailed { message, expected } => {
            assert!(message.contains("no such table"), "message: {message}");
            assert_eq!(expected.len(), 2);
            assert_eq!(
                expected.records()[0].get("name"),
                Some(&Value::Text("Alice".to_string()))
            );
        }
        other => panic!("expected CandidateQueryFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_reference_fails_distinctly() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let outcome = grade(
        &path,
        "SELECT * FORM users",
        REFERENCE,
        &GradeOptions::default(),
    )
    .await
    .unwrap();

    assert!(matches!(outcome, GradeOutcome::ReferenceQueryFailed { .. }));
}

#[tokio::test]
async fn test_mutating_candidate_is_rejected_and_snapshot_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let outcome = grade(
        &path,
        REFERENCE,
        "DELETE FROM users",
        &GradeOptions::default(),
    )
    .await
    .unwrap();

    match outcome {
        GradeOutcome::CandidateQueryFailed { message, .. } => {
            assert!(message.contains("read-only"), "message: {message}");
        }
        other => panic!("expected CandidateQueryFailed, got {other:?}"),
    }

    // Snapshot unchanged for the next grader.
    let again = grade(&path, REFERENCE, REFERENCE, &GradeOptions::default())
        .await
        .unwrap();
    assert!(again.is_correct());
}

#[tokio::test]
async fn test_missing_snapshot_escapes_as_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = grade(
        &dir.path().join("nope.sqlite"),
        REFERENCE,
        REFERENCE,
        &GradeOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(DrillError::Config(_))));
}

#[tokio::test]
async fn test_float_epsilon_applies_to_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    // 9.5 + 20.0 vs a slightly-off literal.
    let reference = "SELECT SUM(total) AS total FROM orders";
    let candidate = "SELECT 29.50001 AS total";

    let strict = grade(&path, reference, candidate, &GradeOptions::default())
        .await
        .unwrap();
    assert!(!strict.is_correct());

    let lenient = GradeOptions {
        check: CheckOptions {
            float_epsilon: 0.001,
            ..Default::default()
        },
    };
    let outcome = grade(&path, reference, candidate, &lenient).await.unwrap();
    assert!(outcome.is_correct());
}

#[tokio::test]
async fn test_column_alias_mismatch_is_incorrect() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let outcome = grade(
        &path,
        "SELECT COUNT(*) AS n FROM users",
        "SELECT COUNT(*) AS total FROM users",
        &GradeOptions::default(),
    )
    .await
    .unwrap();

    match outcome {
        GradeOutcome::Graded { correct, .. } => assert!(!correct),
        other => panic!("expected Graded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_graders_share_a_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed_snapshot(dir.path(), "db.sqlite", USERS_SCHEMA).await;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let path = path.clone();
        handles.push(tokio::spawn(async move {
            grade(&path, REFERENCE, REFERENCE, &GradeOptions::default()).await
        }));
    }

    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert!(outcome.is_correct());
    }
}
