//! Known-schemas cache
//!
//! Tracks schema names this process has created or observed, so repeat
//! `ensure_schema` calls skip the existence probe and the CREATE
//! statement. Lock-free concurrent access via DashSet.
//!
//! The cache is best-effort, not a correctness guarantee: callers racing
//! on the same unseen schema name may each issue a CREATE, which is safe
//! because the DDL itself is idempotent at the database level. The cache
//! is invalidated only by process restart.

use crate::catalog::SchemaName;
use dashmap::DashSet;

/// Thread-safe set of schema names known to exist in the destination.
///
/// # Examples
///
/// ```
/// use sqldest::catalog::{SchemaName, SchemaNameCache};
///
/// let cache = SchemaNameCache::new();
/// let schema = SchemaName::new("analytics");
///
/// assert!(!cache.contains(&schema));
/// cache.insert(schema.clone());
/// assert!(cache.contains(&schema));
/// ```
#[derive(Debug, Default)]
pub struct SchemaNameCache {
    known: DashSet<SchemaName>,
}

impl SchemaNameCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            known: DashSet::new(),
        }
    }

    /// Check whether a schema name is known to exist
    pub fn contains(&self, schema: &SchemaName) -> bool {
        self.known.contains(schema)
    }

    /// Mark a schema name as known to exist.
    ///
    /// Returns `true` if the name was not already cached.
    pub fn insert(&self, schema: SchemaName) -> bool {
        self.known.insert(schema)
    }

    /// Number of cached schema names
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Drop all cached names. Useful for testing.
    pub fn clear(&self) {
        self.known.clear();
    }
}
