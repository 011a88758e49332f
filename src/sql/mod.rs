//! SQL statement generation for destination raw tables.

pub mod ddl;
pub mod transaction;

pub use ddl::{columns, TableDdl};
pub use transaction::build_transaction;
