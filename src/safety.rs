//! Candidate query classification.
//!
//! Parses SQL with sqlparser and decides whether a candidate statement is
//! read-only before it is handed to the engine. Snapshots are opened
//! read-only regardless, so this guard exists for messaging: a learner who
//! submits `DELETE FROM users` gets a grading message naming the statement
//! instead of a raw engine error. SQL that does not parse is passed through
//! untouched so the engine can report its own syntax error.

use sqlparser::ast::{Query, Select, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;
use std::fmt;

/// The kind of non-read-only statement detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Update,
    Delete,
    Merge,
    Drop,
    Truncate,
    Alter,
    Create,
    Other,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Merge => write!(f, "MERGE"),
            Self::Drop => write!(f, "DROP"),
            Self::Truncate => write!(f, "TRUNCATE"),
            Self::Alter => write!(f, "ALTER"),
            Self::Create => write!(f, "CREATE"),
            Self::Other => write!(f, "non-SELECT"),
        }
    }
}

/// Result of classifying a candidate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryClass {
    /// Statement only reads data and may be executed for grading.
    ReadOnly,
    /// Statement would modify the snapshot.
    Mutating(StatementKind),
    /// Statement could not be parsed; let the engine report the error.
    Unparsed,
}

impl QueryClass {
    /// Returns the detected mutating statement kind, if any.
    pub fn mutation(&self) -> Option<StatementKind> {
        match self {
            Self::Mutating(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Classifies a SQL string using the SQLite dialect.
///
/// Multi-statement input is mutating if any statement is.
pub fn classify_sql(sql: &str) -> QueryClass {
    let statements = match Parser::parse_sql(&SQLiteDialect {}, sql) {
        Ok(statements) if !statements.is_empty() => statements,
        _ => return QueryClass::Unparsed,
    };

    for statement in &statements {
        if let Some(kind) = mutation_in_statement(statement) {
            return QueryClass::Mutating(kind);
        }
    }

    QueryClass::ReadOnly
}

/// Returns the mutating kind of a single statement, or None if read-only.
fn mutation_in_statement(statement: &Statement) -> Option<StatementKind> {
    match statement {
        // Queries may hide data-modifying CTEs, so recurse.
        Statement::Query(query) => mutation_in_query(query),
        Statement::Explain {
            analyze, statement, ..
        } => {
            // Plain EXPLAIN only shows the plan; ANALYZE executes it.
            if *analyze {
                mutation_in_statement(statement)
            } else {
                None
            }
        }

        Statement::Insert(_) => Some(StatementKind::Insert),
        Statement::Update { .. } => Some(StatementKind::Update),
        Statement::Delete(_) => Some(StatementKind::Delete),
        Statement::Merge { .. } => Some(StatementKind::Merge),
        Statement::Drop { .. } => Some(StatementKind::Drop),
        Statement::Truncate { .. } => Some(StatementKind::Truncate),
        Statement::AlterTable { .. } => Some(StatementKind::Alter),
        Statement::AlterIndex { .. } => Some(StatementKind::Alter),
        Statement::AlterView { .. } => Some(StatementKind::Alter),
        Statement::CreateTable { .. } => Some(StatementKind::Create),
        Statement::CreateIndex { .. } => Some(StatementKind::Create),
        Statement::CreateView { .. } => Some(StatementKind::Create),

        // Conservative default: anything unrecognized is not read-only.
        _ => Some(StatementKind::Other),
    }
}

/// Recursively inspects a Query for data-modifying operations.
fn mutation_in_query(query: &Query) -> Option<StatementKind> {
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            if let Some(kind) = mutation_in_query(&cte.query) {
                return Some(kind);
            }
        }
    }

    mutation_in_set_expr(&query.body)
}

/// Inspects a SetExpr, recursing into nested queries and set operations.
fn mutation_in_set_expr(set_expr: &SetExpr) -> Option<StatementKind> {
    match set_expr {
        SetExpr::Delete(stmt) => mutation_in_statement(stmt),
        SetExpr::Update(stmt) => mutation_in_statement(stmt),
        SetExpr::Insert(stmt) => mutation_in_statement(stmt),
        SetExpr::Merge(stmt) => mutation_in_statement(stmt),

        SetExpr::Query(query) => mutation_in_query(query),
        SetExpr::Select(select) => mutation_in_select(select),

        SetExpr::SetOperation { left, right, .. } => {
            mutation_in_set_expr(left).or_else(|| mutation_in_set_expr(right))
        }

        SetExpr::Values(_) | SetExpr::Table(_) => None,
    }
}

/// Inspects a Select's FROM clause for subqueries.
fn mutation_in_select(select: &Select) -> Option<StatementKind> {
    select.from.iter().find_map(mutation_in_table_with_joins)
}

fn mutation_in_table_with_joins(twj: &TableWithJoins) -> Option<StatementKind> {
    mutation_in_table_factor(&twj.relation)
        .or_else(|| twj.joins.iter().find_map(|j| mutation_in_table_factor(&j.relation)))
}

/// Recurses into derived tables (subqueries).
fn mutation_in_table_factor(factor: &TableFactor) -> Option<StatementKind> {
    match factor {
        TableFactor::Derived { subquery, .. } => mutation_in_query(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => mutation_in_table_with_joins(table_with_joins),
        _ => None,
    }
}
