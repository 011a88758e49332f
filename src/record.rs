//! Change records and the data-adapter seam.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single change record bound for the destination.
///
/// The payload is carried in serialized form; deserializing is deferred
/// until something actually needs the JSON tree (an adapter, a validity
/// check). `emitted_at_ms` is the record's original emission time in
/// milliseconds since epoch, and `meta` is the per-record metadata that
/// lands in the V2 `meta` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    serialized: String,
    emitted_at_ms: i64,
    meta: Option<Value>,
}

impl ChangeRecord {
    /// Create a record from a serialized JSON payload and emission time
    pub fn new(serialized: impl Into<String>, emitted_at_ms: i64) -> Self {
        Self {
            serialized: serialized.into(),
            emitted_at_ms,
            meta: None,
        }
    }

    /// Create a record carrying per-record metadata
    pub fn with_meta(serialized: impl Into<String>, emitted_at_ms: i64, meta: Value) -> Self {
        Self {
            serialized: serialized.into(),
            emitted_at_ms,
            meta: Some(meta),
        }
    }

    /// The serialized JSON payload
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// Replace the serialized payload
    pub fn set_serialized(&mut self, serialized: String) {
        self.serialized = serialized;
    }

    /// Emission time in milliseconds since epoch
    pub fn emitted_at_ms(&self) -> i64 {
        self.emitted_at_ms
    }

    /// Per-record metadata, if any
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    /// Deserialize the payload into a JSON tree
    pub fn payload(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.serialized)
    }

    /// Run a data adapter over the payload in place.
    ///
    /// Deserializes, adapts, and re-serializes back into the record.
    pub fn apply_adapter(&mut self, adapter: &dyn DataAdapter) -> Result<(), serde_json::Error> {
        let mut payload = self.payload()?;
        adapter.adapt(&mut payload);
        self.serialized = serde_json::to_string(&payload)?;
        Ok(())
    }
}

/// Optional capability that mutates a record's JSON payload before it is
/// staged or loaded (e.g. type coercion a dialect needs).
///
/// Supplied once at construction and shared read-only across all batches.
pub trait DataAdapter: Send + Sync {
    /// Mutate the payload in place
    fn adapt(&self, data: &mut Value);
}
