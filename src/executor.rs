//! Database executor collaborator seam.
//!
//! This core never manages connections, pooling, retries, or timeouts.
//! Every DDL/DML statement goes through a caller-supplied executor, which
//! is assumed to support `BEGIN`/`COMMIT` semantics and `IF [NOT] EXISTS`
//! guards. Calls block until the database acknowledges.

use crate::catalog::SchemaName;
use crate::errors::DatabaseError;

/// Blocking SQL execution capability implemented by the surrounding
/// connector (a pooled connection, a test double, etc.).
pub trait DatabaseExecutor: Send + Sync {
    /// Execute a SQL statement (or a `BEGIN;`..`COMMIT;` payload) as a
    /// single database call.
    fn execute(&self, sql: &str) -> Result<(), DatabaseError>;

    /// Probe whether a schema already exists in the destination.
    ///
    /// Consulted on a cache miss before issuing `CREATE SCHEMA`.
    fn schema_exists(&self, schema: &SchemaName) -> Result<bool, DatabaseError>;
}
