//! Error types for sqldrill.
//!
//! Defines the main error enum used throughout the crate.

use thiserror::Error;

/// Main error type for sqldrill operations.
#[derive(Error, Debug)]
pub enum DrillError {
    /// Configuration errors (missing snapshot file, invalid config file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog errors (unreadable questions file, unknown question, etc.)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Query execution errors (syntax errors, missing tables, runtime errors, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Value decoding errors (engine value could not be mapped to a Value kind)
    #[error("Decode error: {0}")]
    Decode(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DrillError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a catalog error with the given message.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a decode error with the given message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Catalog(_) => "Catalog Error",
            Self::Query(_) => "Query Error",
            Self::Decode(_) => "Decode Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using DrillError.
pub type Result<T> = std::result::Result<T, DrillError>;
