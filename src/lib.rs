//! sqldrill - a SQL practice grader.
//!
//! Executes a reference solution and a learner's candidate query against a
//! read-only SQLite snapshot and reports whether the two result sets are
//! equivalent.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod grade;
pub mod safety;
