//! sqldest - shared destination table lifecycle and batch-load staging
//! for change-data connectors.
//!
//! Connectors that land a stream of change records in a relational
//! warehouse share the same hard problems: idempotent, version-aware
//! schema and table management across heterogeneous SQL dialects,
//! staging a record batch into a form a bulk loader can consume,
//! multi-statement atomicity, and telling user misconfiguration apart
//! from system failure. This crate owns those problems; connection
//! management, retry policy, and the physical bulk-load statement stay
//! behind the [`DatabaseExecutor`] and [`DestinationDialect`] seams.
//!
//! # Example
//!
//! ```no_run
//! use sqldest::catalog::{ProtocolVersion, SchemaName, TableName};
//! use sqldest::{
//!     ChangeRecord, DatabaseExecutor, DestinationDialect, DestinationOperations, Result,
//! };
//!
//! struct MyDialect;
//!
//! impl DestinationDialect for MyDialect {
//!     fn load_v1(
//!         &self,
//!         db: &dyn DatabaseExecutor,
//!         records: &[ChangeRecord],
//!         schema: &SchemaName,
//!         table: &TableName,
//!     ) -> Result<()> {
//!         // stage the batch and run the dialect's bulk-load statement
//!         Ok(())
//!     }
//!
//!     fn load_v2(
//!         &self,
//!         db: &dyn DatabaseExecutor,
//!         records: &[ChangeRecord],
//!         schema: &SchemaName,
//!         table: &TableName,
//!     ) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # fn example(db: &dyn DatabaseExecutor) -> Result<()> {
//! let ops = DestinationOperations::new(ProtocolVersion::V2, MyDialect);
//! let schema = SchemaName::new("landing");
//! let table = TableName::new("users_raw");
//!
//! ops.ensure_schema(db, &schema)?;
//! ops.ensure_table(db, &schema, &table)?;
//!
//! let mut batch = vec![ChangeRecord::new(r#"{"id": 1}"#, 1714000000000)];
//! ops.insert_records(db, &mut batch, &schema, &table)?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod classifier;
pub mod dialect;
pub mod errors;
pub mod executor;
pub mod operations;
pub mod record;
pub mod sql;
pub mod staging;

pub use catalog::{ProtocolVersion, SchemaName, SchemaNameCache, TableName};
pub use classifier::{ErrorClassifier, PassthroughClassifier};
pub use dialect::DestinationDialect;
pub use errors::{ConfigError, DatabaseError, DestinationError, Result};
pub use executor::DatabaseExecutor;
pub use operations::DestinationOperations;
pub use record::{ChangeRecord, DataAdapter};
pub use sql::{build_transaction, TableDdl};
pub use staging::BatchStager;
