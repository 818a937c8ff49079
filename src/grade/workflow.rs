//! Grading workflow.
//!
//! Orchestrates one grading attempt: execute the reference solution, execute
//! the candidate query, compare the result sets. Per-query engine failures
//! become outcome data rather than errors; only a snapshot that cannot be
//! opened escapes as `Err`, since that request was never gradable at all.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::db::{self, DatabaseClient, ResultSet};
use crate::error::Result;
use crate::grade::{is_equivalent, CheckOptions};
use crate::safety::classify_sql;

/// Options for one grading attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradeOptions {
    /// Equivalence policy handed to the checker.
    pub check: CheckOptions,
}

/// Terminal outcome of a grading attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GradeOutcome {
    /// The reference solution itself failed to execute. The question is
    /// broken; this is a setup defect, not a learner mistake.
    ReferenceQueryFailed { message: String },

    /// The reference solution succeeded but the candidate query failed.
    /// Carries the expected result set so the caller can still show it.
    CandidateQueryFailed { message: String, expected: ResultSet },

    /// Both queries executed; `correct` is the equivalence checker's verdict.
    Graded {
        correct: bool,
        expected: ResultSet,
        actual: ResultSet,
    },
}

impl GradeOutcome {
    /// Returns true only for a graded, correct answer.
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Graded { correct: true, .. })
    }
}

/// Grades `candidate_query` against `reference_query` on the given snapshot.
///
/// The snapshot is opened read-only and released on every exit path. A
/// missing or unopenable snapshot is returned as `Err`.
pub async fn grade(
    snapshot: &Path,
    reference_query: &str,
    candidate_query: &str,
    options: &GradeOptions,
) -> Result<GradeOutcome> {
    let client = db::open_snapshot(snapshot).await?;
    let outcome = grade_with_client(client.as_ref(), reference_query, candidate_query, options).await;
    client.close().await?;
    Ok(outcome)
}

/// Grading body over any client implementation.
///
/// Useful with mocks in tests and with callers that manage their own
/// snapshot handles. Does not close the client.
pub async fn grade_with_client(
    client: &dyn DatabaseClient,
    reference_query: &str,
    candidate_query: &str,
    options: &GradeOptions,
) -> GradeOutcome {
    // Reference first, to fail fast on a broken question.
    let expected = match client.execute_query(reference_query).await {
        Ok(expected) => expected,
        Err(e) => {
            return GradeOutcome::ReferenceQueryFailed {
                message: e.to_string(),
            }
        }
    };

    // The read-only snapshot would reject a mutation anyway; classifying
    // first turns it into a message that names the offending statement.
    if let Some(kind) = classify_sql(candidate_query).mutation() {
        return GradeOutcome::CandidateQueryFailed {
            message: format!("candidate query must be read-only, found a {kind} statement"),
            expected,
        };
    }

    let actual = match client.execute_query(candidate_query).await {
        Ok(actual) => actual,
        Err(e) => {
            return GradeOutcome::CandidateQueryFailed {
                message: e.to_string(),
                expected,
            }
        }
    };

    let correct = is_equivalent(&expected, &actual, &options.check);
    debug!(
        correct,
        expected_rows = expected.len(),
        actual_rows = actual.len(),
        "Graded candidate query"
    );

    GradeOutcome::Graded {
        correct,
        expected,
        actual,
    }
}
