//! Type-safe wrapper for destination schema identifiers
//!
//! This module provides a newtype pattern around String to ensure type safety
//! when working with schema identifiers throughout the codebase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for destination schema identifiers
///
/// # Examples
///
/// ```
/// use sqldest::catalog::SchemaName;
///
/// let schema = SchemaName::new("analytics");
/// assert_eq!(schema.as_str(), "analytics");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaName(String);

impl SchemaName {
    /// Create a new SchemaName from a string
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the schema name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SchemaName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SchemaName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SchemaName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
