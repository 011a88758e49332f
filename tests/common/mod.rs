//! Shared fixtures for integration tests.
//!
//! `ScriptedDb` is an in-memory stand-in for the database executor: it
//! records every payload it is handed and keeps a coarse model of
//! schemas, tables, and rows so lifecycle tests can assert end state. A
//! payload either fails before any effect applies or applies in full,
//! which models the all-or-nothing behavior of a `BEGIN;`..`COMMIT;`
//! call.

use sqldest::{DatabaseError, DatabaseExecutor, SchemaName};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
struct DbState {
    executed: Vec<String>,
    schemas: HashSet<String>,
    tables: HashMap<String, Vec<String>>,
    failures: Vec<(String, DatabaseError)>,
}

/// In-memory scripted database executor.
#[derive(Default)]
pub struct ScriptedDb {
    state: Mutex<DbState>,
}

impl ScriptedDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a schema, as if another process created it earlier.
    pub fn add_schema(&self, name: &str) {
        self.state.lock().unwrap().schemas.insert(name.to_string());
    }

    /// Fail any payload containing `pattern` with `error`, before any
    /// effect applies.
    pub fn fail_on(&self, pattern: &str, error: DatabaseError) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((pattern.to_string(), error));
    }

    /// Every payload successfully executed, in order.
    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    pub fn table_exists(&self, schema: &str, table: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .tables
            .contains_key(&format!("{}.{}", schema, table))
    }

    pub fn row_count(&self, schema: &str, table: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(&format!("{}.{}", schema, table))
            .map(|rows| rows.len())
            .unwrap_or(0)
    }
}

impl DatabaseExecutor for ScriptedDb {
    fn execute(&self, sql: &str) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().unwrap();

        if let Some((_, error)) = state
            .failures
            .iter()
            .find(|(pattern, _)| sql.contains(pattern.as_str()))
        {
            return Err(error.clone());
        }

        state.executed.push(sql.to_string());
        // Our generated statements never embed semicolons, so splitting
        // is enough to walk a transactional payload.
        for statement in sql.split(';') {
            apply(&mut state, statement.trim());
        }
        Ok(())
    }

    fn schema_exists(&self, schema: &SchemaName) -> Result<bool, DatabaseError> {
        Ok(self.state.lock().unwrap().schemas.contains(schema.as_str()))
    }
}

fn apply(state: &mut DbState, statement: &str) {
    if statement.is_empty() || statement == "BEGIN" || statement == "COMMIT" {
        return;
    }

    if let Some(rest) = statement.strip_prefix("CREATE SCHEMA IF NOT EXISTS ") {
        state.schemas.insert(rest.trim().to_string());
    } else if let Some(rest) = statement.strip_prefix("CREATE TABLE IF NOT EXISTS ") {
        if let Some(name) = rest.split_whitespace().next() {
            state.tables.entry(name.to_string()).or_default();
        }
    } else if let Some(rest) = statement.strip_prefix("DROP TABLE IF EXISTS ") {
        state.tables.remove(rest.trim());
    } else if let Some(rest) = statement.strip_prefix("TRUNCATE TABLE ") {
        if let Some(rows) = state.tables.get_mut(rest.trim()) {
            rows.clear();
        }
    } else if let Some(rest) = statement.strip_prefix("INSERT INTO ") {
        if let Some((dst, src)) = rest.split_once(" SELECT * FROM ") {
            let src_rows = state.tables.get(src.trim()).cloned().unwrap_or_default();
            state
                .tables
                .entry(dst.trim().to_string())
                .or_default()
                .extend(src_rows);
        } else if let Some((table, values)) = rest.split_once(" VALUES ") {
            state
                .tables
                .entry(table.trim().to_string())
                .or_default()
                .push(values.trim().to_string());
        }
    }
    // Anything else (CREATE INDEX, ...) acknowledges without a modeled
    // effect.
}
