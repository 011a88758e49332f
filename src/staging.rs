//! Batch staging: serialize a record batch into escaped CSV for bulk
//! loading.
//!
//! One CSV row per record, columns in the exact order of the matching
//! CREATE TABLE layout, since bulk-load tooling binds columns
//! positionally. Output is UTF-8 with RFC 4180 escaping so any dialect's
//! loader can parse it unambiguously. The staging medium (temp file,
//! in-memory buffer, pipe) is the caller's choice of `io::Write`.

use crate::catalog::ProtocolVersion;
use crate::errors::{DestinationError, Result};
use crate::record::{ChangeRecord, DataAdapter};
use chrono::{SecondsFormat, TimeZone, Utc};
use std::io::Write;
use std::sync::Arc;
use uuid::Uuid;

/// Converts an ordered record batch into staged CSV rows.
///
/// Each row gets a fresh random row identifier, the (optionally adapted)
/// serialized payload, and an extraction timestamp derived from the
/// record's emission time. V2 rows additionally carry an empty
/// `loaded_at` field (NULL to the loader) and the serialized per-record
/// metadata.
///
/// Holds no reference to the batch after staging, so memory stays
/// bounded by one batch at a time.
pub struct BatchStager {
    version: ProtocolVersion,
    adapter: Option<Arc<dyn DataAdapter>>,
}

impl BatchStager {
    /// Create a stager for the given protocol version
    pub fn new(version: ProtocolVersion) -> Self {
        Self {
            version,
            adapter: None,
        }
    }

    /// Create a stager that runs a data adapter over every payload
    pub fn with_data_adapter(version: ProtocolVersion, adapter: Arc<dyn DataAdapter>) -> Self {
        Self {
            version,
            adapter: Some(adapter),
        }
    }

    /// The protocol version this stager targets
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Stage a batch, writing one CSV row per record in input order.
    ///
    /// Returns the number of rows written.
    pub fn stage<W: Write>(&self, records: &[ChangeRecord], out: W) -> Result<usize> {
        let mut writer = csv::Writer::from_writer(out);

        for record in records {
            let row_id = Uuid::new_v4().to_string();
            let data = match &self.adapter {
                Some(adapter) => {
                    let mut payload = record.payload()?;
                    adapter.adapt(&mut payload);
                    serde_json::to_string(&payload)?
                }
                // Without an adapter the original serialized payload is
                // written unchanged, skipping the decode/encode cycle.
                None => record.serialized().to_string(),
            };
            let extracted_at = format_extracted_at(record.emitted_at_ms())?;

            match self.version {
                ProtocolVersion::V1 => {
                    writer.write_record([row_id.as_str(), data.as_str(), extracted_at.as_str()])?;
                }
                ProtocolVersion::V2 => {
                    let meta = match record.meta() {
                        Some(meta) => serde_json::to_string(meta)?,
                        None => "null".to_string(),
                    };
                    // loaded_at stays empty: the column is NULL until the
                    // typing/deduping pass fills it.
                    writer.write_record([
                        row_id.as_str(),
                        data.as_str(),
                        extracted_at.as_str(),
                        "",
                        meta.as_str(),
                    ])?;
                }
            }
        }

        writer.flush()?;
        log::debug!("Staged {} records ({})", records.len(), self.version);
        Ok(records.len())
    }
}

/// Render an epoch-milliseconds emission time as an RFC 3339 UTC
/// timestamp, with sub-second digits only when they are non-zero.
fn format_extracted_at(emitted_at_ms: i64) -> Result<String> {
    let timestamp = Utc
        .timestamp_millis_opt(emitted_at_ms)
        .single()
        .ok_or(DestinationError::InvalidTimestamp(emitted_at_ms))?;
    Ok(timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::HashSet;

    fn stage_to_rows(stager: &BatchStager, records: &[ChangeRecord]) -> Vec<Vec<String>> {
        let mut buf = Vec::new();
        stager.stage(records, &mut buf).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(buf.as_slice());
        reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_v1_row_shape() {
        let stager = BatchStager::new(ProtocolVersion::V1);
        let records = vec![ChangeRecord::new(r#"{"id":1}"#, 1000)];

        let rows = stage_to_rows(&stager, &records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 3);
        assert!(!rows[0][0].is_empty());
        assert_eq!(rows[0][1], r#"{"id":1}"#);
        assert_eq!(rows[0][2], "1970-01-01T00:00:01Z");
    }

    #[test]
    fn test_v2_row_shape_and_null_loaded_at() {
        let stager = BatchStager::new(ProtocolVersion::V2);
        let records = vec![ChangeRecord::with_meta(
            r#"{"id":1}"#,
            1000,
            json!({"changes": []}),
        )];

        let rows = stage_to_rows(&stager, &records);
        assert_eq!(rows[0].len(), 5);
        assert_eq!(rows[0][3], "", "loaded_at must stage as NULL");
        assert_eq!(rows[0][4], r#"{"changes":[]}"#);
    }

    #[test]
    fn test_missing_meta_serializes_as_json_null() {
        let stager = BatchStager::new(ProtocolVersion::V2);
        let rows = stage_to_rows(&stager, &[ChangeRecord::new("{}", 1000)]);
        assert_eq!(rows[0][4], "null");
    }

    #[test]
    fn test_order_count_and_unique_row_ids() {
        let stager = BatchStager::new(ProtocolVersion::V1);
        let records: Vec<ChangeRecord> = (0..50)
            .map(|i| ChangeRecord::new(format!(r#"{{"seq":{}}}"#, i), 1000 + i))
            .collect();

        let rows = stage_to_rows(&stager, &records);
        assert_eq!(rows.len(), 50);

        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row[1], format!(r#"{{"seq":{}}}"#, i));
        }

        let ids: HashSet<&String> = rows.iter().map(|r| &r[0]).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_extracted_at_formatting() {
        let stager = BatchStager::new(ProtocolVersion::V2);
        let records = vec![
            ChangeRecord::new("{}", 1000),
            ChangeRecord::new("{}", 2000),
            ChangeRecord::new("{}", 3000),
            ChangeRecord::new("{}", 1500),
        ];

        let rows = stage_to_rows(&stager, &records);
        assert_eq!(rows[0][2], "1970-01-01T00:00:01Z");
        assert_eq!(rows[1][2], "1970-01-01T00:00:02Z");
        assert_eq!(rows[2][2], "1970-01-01T00:00:03Z");
        assert_eq!(rows[3][2], "1970-01-01T00:00:01.500Z");
    }

    #[test]
    fn test_adapter_applied_to_every_staged_payload() {
        struct Tagging;

        impl DataAdapter for Tagging {
            fn adapt(&self, data: &mut Value) {
                if let Some(map) = data.as_object_mut() {
                    map.insert("adapted".to_string(), Value::Bool(true));
                }
            }
        }

        let stager = BatchStager::with_data_adapter(ProtocolVersion::V1, Arc::new(Tagging));
        let records = vec![
            ChangeRecord::new(r#"{"id":1}"#, 1000),
            ChangeRecord::new(r#"{"id":2}"#, 2000),
        ];

        let rows = stage_to_rows(&stager, &records);
        for row in &rows {
            let payload: Value = serde_json::from_str(&row[1]).unwrap();
            assert_eq!(payload["adapted"], true);
        }
    }

    #[test]
    fn test_no_adapter_keeps_payload_verbatim() {
        // Key order would not survive a decode/encode cycle
        let raw = r#"{"z":1,"a":2}"#;
        let stager = BatchStager::new(ProtocolVersion::V1);
        let rows = stage_to_rows(&stager, &[ChangeRecord::new(raw, 1000)]);
        assert_eq!(rows[0][1], raw);
    }

    #[test]
    fn test_payload_with_embedded_delimiters_survives_escaping() {
        let raw = r#"{"note":"contains, comma and \"quotes\""}"#;
        let stager = BatchStager::new(ProtocolVersion::V1);
        let rows = stage_to_rows(&stager, &[ChangeRecord::new(raw, 1000)]);
        assert_eq!(rows[0][1], raw);
    }

    #[test]
    fn test_unrepresentable_timestamp_rejected() {
        let stager = BatchStager::new(ProtocolVersion::V1);
        let records = vec![ChangeRecord::new("{}", i64::MAX)];
        let err = stager.stage(&records, Vec::new()).unwrap_err();
        assert!(matches!(err, DestinationError::InvalidTimestamp(_)));
    }
}
