//! Table preview types.
//!
//! A snapshot's schema is exposed only as its user table names plus a few
//! sample rows per table, which is all the practice UI needs to show.

use serde::Serialize;

use super::ResultSet;

/// A user table in a snapshot together with a handful of sample rows.
#[derive(Debug, Clone, Serialize)]
pub struct TablePreview {
    /// Table name as reported by the engine.
    pub name: String,

    /// Up to five rows of sample data. Empty if sampling the table failed.
    pub rows: ResultSet,
}
