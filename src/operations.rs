//! Destination operations orchestrator.
//!
//! The single entry point connectors use to manage raw tables and write
//! record batches. Wires together the schema cache, the DDL generator,
//! the error classifier, and the dialect collaborator; every database
//! call routes its failure through the classifier before propagating.

use crate::catalog::{ProtocolVersion, SchemaName, SchemaNameCache, TableName};
use crate::classifier::{ErrorClassifier, PassthroughClassifier};
use crate::dialect::DestinationDialect;
use crate::errors::{DatabaseError, DestinationError, Result};
use crate::executor::DatabaseExecutor;
use crate::record::{ChangeRecord, DataAdapter};
use crate::sql::{build_transaction, TableDdl};
use std::sync::Arc;

/// Table-lifecycle and batch-load operations for one destination.
///
/// Constructed once per destination with the protocol version the
/// destination committed to; the version is never selectable per call.
/// The optional data adapter and the error classifier are injected at
/// construction as well, so behavior is uniform across every batch.
///
/// # Examples
///
/// ```no_run
/// use sqldest::catalog::{ProtocolVersion, SchemaName, TableName};
/// use sqldest::operations::DestinationOperations;
/// use sqldest::{ChangeRecord, DatabaseExecutor, DestinationDialect, Result};
///
/// struct InsertDialect;
///
/// impl DestinationDialect for InsertDialect {
///     fn load_v1(
///         &self,
///         db: &dyn DatabaseExecutor,
///         records: &[ChangeRecord],
///         schema: &SchemaName,
///         table: &TableName,
///     ) -> Result<()> {
///         // stage and bulk-load here
///         Ok(())
///     }
///
///     fn load_v2(
///         &self,
///         db: &dyn DatabaseExecutor,
///         records: &[ChangeRecord],
///         schema: &SchemaName,
///         table: &TableName,
///     ) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// # fn run(db: &dyn DatabaseExecutor) -> Result<()> {
/// let ops = DestinationOperations::new(ProtocolVersion::V2, InsertDialect);
/// let schema = SchemaName::new("s1");
/// let table = TableName::new("t1");
///
/// ops.ensure_schema(db, &schema)?;
/// ops.ensure_table(db, &schema, &table)?;
///
/// let mut batch = vec![ChangeRecord::new(r#"{"id":1}"#, 1000)];
/// ops.insert_records(db, &mut batch, &schema, &table)?;
/// # Ok(())
/// # }
/// ```
pub struct DestinationOperations<D: DestinationDialect> {
    version: ProtocolVersion,
    ddl: TableDdl,
    dialect: D,
    adapter: Option<Arc<dyn DataAdapter>>,
    classifier: Arc<dyn ErrorClassifier>,
    schema_cache: SchemaNameCache,
}

impl<D: DestinationDialect> DestinationOperations<D> {
    /// Create operations for a destination committed to `version`
    pub fn new(version: ProtocolVersion, dialect: D) -> Self {
        Self {
            version,
            ddl: TableDdl::new(version),
            dialect,
            adapter: None,
            classifier: Arc::new(PassthroughClassifier),
            schema_cache: SchemaNameCache::new(),
        }
    }

    /// Attach a data adapter applied to every record before loading
    pub fn with_data_adapter(mut self, adapter: Arc<dyn DataAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Attach a dialect-specific error classifier
    pub fn with_classifier(mut self, classifier: Arc<dyn ErrorClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// The protocol version this instance targets
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// The DDL generator for this instance's version
    pub fn ddl(&self) -> &TableDdl {
        &self.ddl
    }

    /// The dialect collaborator
    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Route a database failure through the classifier: a recognized
    /// configuration problem replaces the original error, anything else
    /// propagates unchanged.
    fn check_database<T>(&self, result: std::result::Result<T, DatabaseError>) -> Result<T> {
        result.map_err(|error| match self.classifier.classify(&error) {
            Some(config) => DestinationError::Config(config),
            None => DestinationError::Database(error),
        })
    }

    /// Create the schema unless it is already known to exist.
    ///
    /// No-op when the name is cached or the existence probe reports it,
    /// in which case the name is cached for subsequent calls. Racing
    /// callers may each issue the CREATE; the statement's
    /// `IF NOT EXISTS` guard makes that safe.
    pub fn ensure_schema(&self, db: &dyn DatabaseExecutor, schema: &SchemaName) -> Result<()> {
        if !self.dialect.is_schema_required() {
            return Ok(());
        }
        if self.schema_cache.contains(schema) {
            return Ok(());
        }
        if !self.check_database(db.schema_exists(schema))? {
            log::debug!("Creating schema {}", schema);
            self.check_database(
                db.execute(&format!("CREATE SCHEMA IF NOT EXISTS {};", schema)),
            )?;
        }
        self.schema_cache.insert(schema.clone());
        Ok(())
    }

    /// Create the raw table with the version-selected layout, then run
    /// the dialect's post-create statements (none by default).
    pub fn ensure_table(
        &self,
        db: &dyn DatabaseExecutor,
        schema: &SchemaName,
        table: &TableName,
    ) -> Result<()> {
        self.check_database(db.execute(&self.ddl.create_table(schema, table)))?;
        for statement in self.dialect.post_create_table_statements(schema, table) {
            self.check_database(db.execute(&statement))?;
        }
        Ok(())
    }

    /// Drop the table if it exists
    pub fn drop_table(
        &self,
        db: &dyn DatabaseExecutor,
        schema: &SchemaName,
        table: &TableName,
    ) -> Result<()> {
        self.check_database(db.execute(&self.ddl.drop_table(schema, table)))
    }

    /// Empty the table, leaving it in place
    pub fn truncate_table(
        &self,
        db: &dyn DatabaseExecutor,
        schema: &SchemaName,
        table: &TableName,
    ) -> Result<()> {
        self.check_database(db.execute(&self.ddl.truncate_table(schema, table)))
    }

    /// Copy every row from `src` into `dst` within the same schema
    pub fn insert_select_all(
        &self,
        db: &dyn DatabaseExecutor,
        schema: &SchemaName,
        src: &TableName,
        dst: &TableName,
    ) -> Result<()> {
        self.check_database(db.execute(&self.ddl.insert_select_all(schema, src, dst)))
    }

    /// Apply an ordered statement list atomically.
    ///
    /// The statements are submitted between `BEGIN;` and `COMMIT;` as a
    /// single database call; either all apply or none do.
    pub fn execute_transaction(
        &self,
        db: &dyn DatabaseExecutor,
        statements: &[String],
    ) -> Result<()> {
        self.check_database(db.execute(&build_transaction(statements)))
    }

    /// Write a record batch to the destination table.
    ///
    /// Applies the configured data adapter to every record's payload in
    /// place, then dispatches to the dialect's loader for this
    /// instance's protocol version. This is the single entry point for
    /// writing a batch; dialects only see the already-adapted records.
    pub fn insert_records(
        &self,
        db: &dyn DatabaseExecutor,
        records: &mut [ChangeRecord],
        schema: &SchemaName,
        table: &TableName,
    ) -> Result<()> {
        if let Some(adapter) = &self.adapter {
            for record in records.iter_mut() {
                record.apply_adapter(adapter.as_ref())?;
            }
        }
        log::debug!(
            "Inserting {} records into {}.{} ({})",
            records.len(),
            schema,
            table,
            self.version
        );
        match self.version {
            ProtocolVersion::V1 => self.dialect.load_v1(db, records, schema, table),
            ProtocolVersion::V2 => self.dialect.load_v2(db, records, schema, table),
        }
    }
}
