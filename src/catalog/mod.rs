//! Destination catalog types: typed identifiers, protocol version, and the
//! known-schemas cache.

pub mod protocol;
pub mod schema_cache;
pub mod schema_name;
pub mod table_name;

pub use protocol::ProtocolVersion;
pub use schema_cache::SchemaNameCache;
pub use schema_name::SchemaName;
pub use table_name::TableName;
