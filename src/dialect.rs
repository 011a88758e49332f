//! Per-dialect destination capability.
//!
//! The physical bulk load (direct multi-row INSERT, file-based COPY, a
//! native LOAD command) differs per warehouse and lives behind this
//! trait. The core depends only on the trait, never on a concrete
//! dialect.

use crate::catalog::{SchemaName, TableName};
use crate::errors::Result;
use crate::executor::DatabaseExecutor;
use crate::record::ChangeRecord;
use serde_json::Value;

/// Dialect-specific destination behavior.
///
/// `load_v1` and `load_v2` transport a record batch into the target table
/// using whatever mechanism the dialect supports; most implementations
/// run the batch through [`BatchStager`](crate::staging::BatchStager)
/// first and feed the staged form to their bulk-load statement. The
/// remaining methods have defaults that most dialects keep.
pub trait DestinationDialect: Send + Sync {
    /// Physically load a batch into a V1 raw table
    fn load_v1(
        &self,
        db: &dyn DatabaseExecutor,
        records: &[ChangeRecord],
        schema: &SchemaName,
        table: &TableName,
    ) -> Result<()>;

    /// Physically load a batch into a V2 raw table
    fn load_v2(
        &self,
        db: &dyn DatabaseExecutor,
        records: &[ChangeRecord],
        schema: &SchemaName,
        table: &TableName,
    ) -> Result<()>;

    /// Statements to run after CREATE TABLE.
    ///
    /// Some dialects cannot express everything inside the CREATE itself.
    /// Postgres, for example, needs separate CREATE INDEX statements.
    fn post_create_table_statements(
        &self,
        _schema: &SchemaName,
        _table: &TableName,
    ) -> Vec<String> {
        Vec::new()
    }

    /// Whether this destination namespaces tables under schemas.
    ///
    /// Dialects without schema support return `false`, making
    /// `ensure_schema` a no-op.
    fn is_schema_required(&self) -> bool {
        true
    }

    /// Whether the destination can store this payload.
    ///
    /// Callers consult this to drop or reroute records the dialect cannot
    /// represent (e.g. values outside the warehouse's numeric range).
    fn is_valid_data(&self, _data: &Value) -> bool {
        true
    }
}
