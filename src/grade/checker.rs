//! Result-set equivalence checking.
//!
//! Decides whether a candidate result set counts as the same answer as the
//! expected one. The default policy is deliberately strict: order-sensitive,
//! name-sensitive, exact values. That reproduces serialized-structure
//! equality, the historical definition of "correct" for these exercises,
//! and the sharp edges that come with it (a logically-equal `GROUP BY`
//! result in a different row order is wrong by default). The relaxations
//! are opt-in via [`CheckOptions`].

use crate::db::{Record, ResultSet, Value};

/// Comparison policy for the equivalence check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckOptions {
    /// Compare values positionally and ignore column names entirely.
    pub ignore_column_naming: bool,

    /// Tolerance for numeric comparison. 0.0 means exact.
    pub float_epsilon: f64,

    /// Match rows as an unordered multiset instead of position by position.
    pub ignore_row_order: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            ignore_column_naming: false,
            float_epsilon: 0.0,
            ignore_row_order: false,
        }
    }
}

/// Returns true if `actual` is an acceptable answer for `expected`.
///
/// Pure function of its inputs: no I/O, no hidden state, binary outcome.
pub fn is_equivalent(expected: &ResultSet, actual: &ResultSet, options: &CheckOptions) -> bool {
    if expected.len() != actual.len() {
        return false;
    }

    if options.ignore_row_order {
        rows_match_unordered(expected.records(), actual.records(), options)
    } else {
        expected
            .records()
            .iter()
            .zip(actual.records())
            .all(|(exp, act)| records_match(exp, act, options))
    }
}

/// Greedy multiset matching: every expected row claims one unused actual row.
fn rows_match_unordered(expected: &[Record], actual: &[Record], options: &CheckOptions) -> bool {
    let mut used = vec![false; actual.len()];

    'expected: for exp in expected {
        for (i, act) in actual.iter().enumerate() {
            if !used[i] && records_match(exp, act, options) {
                used[i] = true;
                continue 'expected;
            }
        }
        return false;
    }

    true
}

/// Compares one paired row under the configured column policy.
fn records_match(expected: &Record, actual: &Record, options: &CheckOptions) -> bool {
    if expected.len() != actual.len() {
        return false;
    }

    if options.ignore_column_naming {
        return expected
            .values()
            .zip(actual.values())
            .all(|(exp, act)| values_match(exp, act, options.float_epsilon));
    }

    // Equal lengths plus unique names per record, so checking every expected
    // column has a matching counterpart establishes set equality.
    expected.iter().all(|(name, exp)| {
        actual
            .get(name)
            .is_some_and(|act| values_match(exp, act, options.float_epsilon))
    })
}

/// Compares two scalar values.
///
/// Null equals only Null; booleans by identity; text and blobs byte for
/// byte; integers and floats numerically, within `epsilon`.
fn values_match(expected: &Value, actual: &Value, epsilon: f64) -> bool {
    match (expected, actual) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Blob(a), Value::Blob(b)) => a == b,
        // Exact integer comparison avoids f64 rounding above 2^53.
        (Value::Int(a), Value::Int(b)) if epsilon == 0.0 => a == b,
        _ => match (expected.as_number(), actual.as_number()) {
            (Some(a), Some(b)) => (a - b).abs() <= epsilon,
            _ => false,
        },
    }
}
