//! Version-aware DDL statement builders.
//!
//! The generated column names and their order are a persisted contract:
//! downstream typing/deduping transformers and schema migrators bind to
//! them, and bulk loaders bind columns positionally. Do not change either
//! without an explicit migration path.

use crate::catalog::{ProtocolVersion, SchemaName, TableName};

/// Destination raw-table column names.
pub mod columns {
    /// V1 primary key
    pub const ID: &str = "id";
    /// Serialized record payload (both versions)
    pub const DATA: &str = "data";
    /// V1 emission timestamp
    pub const TIMESTAMP: &str = "timestamp";
    /// V2 primary key
    pub const RAW_ID: &str = "raw_id";
    /// V2 extraction timestamp
    pub const EXTRACTED_AT: &str = "extracted_at";
    /// V2 load timestamp, null until the typing/deduping pass runs
    pub const LOADED_AT: &str = "loaded_at";
    /// V2 per-record metadata
    pub const META: &str = "meta";
}

/// Generates CREATE/DROP/TRUNCATE/INSERT-SELECT statements for one
/// protocol generation.
///
/// All statements carry `IF NOT EXISTS` / `IF EXISTS` guards where the
/// statement form supports them, so repeated execution is a no-op.
///
/// # Examples
///
/// ```
/// use sqldest::catalog::{ProtocolVersion, SchemaName, TableName};
/// use sqldest::sql::TableDdl;
///
/// let ddl = TableDdl::new(ProtocolVersion::V2);
/// let sql = ddl.create_table(&SchemaName::new("s1"), &TableName::new("t1"));
/// assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS s1.t1"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TableDdl {
    version: ProtocolVersion,
}

impl TableDdl {
    /// Create a generator for the given protocol version
    pub fn new(version: ProtocolVersion) -> Self {
        Self { version }
    }

    /// The protocol version this generator targets
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// CREATE TABLE statement with the version-selected column layout
    pub fn create_table(&self, schema: &SchemaName, table: &TableName) -> String {
        match self.version {
            ProtocolVersion::V1 => Self::create_table_v1(schema, table),
            ProtocolVersion::V2 => Self::create_table_v2(schema, table),
        }
    }

    fn create_table_v1(schema: &SchemaName, table: &TableName) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {}.{} (\n  {} VARCHAR PRIMARY KEY,\n  {} JSONB,\n  {} TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP\n);\n",
            schema,
            table,
            columns::ID,
            columns::DATA,
            columns::TIMESTAMP,
        )
    }

    // meta was added by ALTER after the first V2 rollout; it must stay the
    // last column or existing ALTER-based migrations break.
    fn create_table_v2(schema: &SchemaName, table: &TableName) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {}.{} (\n  {} VARCHAR PRIMARY KEY,\n  {} JSONB,\n  {} TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,\n  {} TIMESTAMP WITH TIME ZONE DEFAULT NULL,\n  {} JSONB\n);\n",
            schema,
            table,
            columns::RAW_ID,
            columns::DATA,
            columns::EXTRACTED_AT,
            columns::LOADED_AT,
            columns::META,
        )
    }

    /// DROP TABLE statement, a no-op when the table is already gone
    pub fn drop_table(&self, schema: &SchemaName, table: &TableName) -> String {
        format!("DROP TABLE IF EXISTS {}.{};\n", schema, table)
    }

    /// TRUNCATE TABLE statement
    pub fn truncate_table(&self, schema: &SchemaName, table: &TableName) -> String {
        format!("TRUNCATE TABLE {}.{};\n", schema, table)
    }

    /// Copy every row from `src` into `dst` within the same schema
    pub fn insert_select_all(
        &self,
        schema: &SchemaName,
        src: &TableName,
        dst: &TableName,
    ) -> String {
        format!(
            "INSERT INTO {}.{} SELECT * FROM {}.{};\n",
            schema, dst, schema, src
        )
    }
}
