//! Error types for destination operations.
//!
//! Failures fall into two buckets that monitoring treats very differently:
//! a [`ConfigError`] is a user-actionable destination misconfiguration
//! (missing permission, absent schema, bad identifier), while everything
//! else is an unexpected system failure that keeps its original
//! diagnostic detail. See [`crate::classifier`] for how database errors
//! are reclassified into the first bucket.

use std::fmt;
use thiserror::Error;

/// Error raised by the database executor collaborator.
///
/// Carries the driver's message plus the five-character SQLSTATE code when
/// the driver exposes one. Classifiers match on the SQLSTATE (or message
/// text) to recognize known configuration problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseError {
    message: String,
    sqlstate: Option<String>,
}

impl DatabaseError {
    /// Create a new database error with the provided message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sqlstate: None,
        }
    }

    /// Create a database error carrying a SQLSTATE code.
    pub fn with_sqlstate(message: impl Into<String>, sqlstate: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sqlstate: Some(sqlstate.into()),
        }
    }

    /// The driver's diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The SQLSTATE code, if the driver reported one.
    pub fn sqlstate(&self) -> Option<&str> {
        self.sqlstate.as_deref()
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sqlstate {
            Some(state) => write!(f, "{} (SQLSTATE {})", self.message, state),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DatabaseError {}

/// User-actionable configuration error.
///
/// Raised in place of the original database error when a classifier
/// recognizes the failure as destination misconfiguration. The message
/// must tell the user what to fix (e.g. which permission to grant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// Create a new configuration error with an actionable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The user-facing actionable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Main error type for destination operations.
#[derive(Error, Debug)]
pub enum DestinationError {
    /// Destination misconfiguration recognized by a classifier
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Unreclassified failure from the database executor
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Record payload or metadata (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Staged CSV output failure
    #[error("Staging error: {0}")]
    Staging(#[from] csv::Error),

    /// I/O failure flushing staged output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record emission time outside the representable timestamp range
    #[error("Invalid emitted_at timestamp: {0} ms")]
    InvalidTimestamp(i64),
}

impl DestinationError {
    /// True when this failure is user-actionable misconfiguration rather
    /// than a system failure. Monitoring keys off this distinction.
    pub fn is_config(&self) -> bool {
        matches!(self, DestinationError::Config(_))
    }
}

/// Result type alias using DestinationError.
pub type Result<T> = std::result::Result<T, DestinationError>;
