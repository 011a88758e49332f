//! Multi-statement transaction payloads.
//!
//! Statements are concatenated verbatim between `BEGIN;` and `COMMIT;`
//! and submitted as a single database call, so the underlying database's
//! transaction semantics make them atomic. No client-side rollback logic
//! exists at this layer.

/// Build a `BEGIN;`..`COMMIT;` payload from an ordered statement list.
///
/// Statements are appended verbatim and in order; callers supply
/// statements that carry their own terminators (every
/// [`TableDdl`](crate::sql::TableDdl) builder does).
///
/// # Examples
///
/// ```
/// use sqldest::sql::build_transaction;
///
/// let payload = build_transaction(&[
///     "TRUNCATE TABLE s1.t1;\n".to_string(),
///     "INSERT INTO s1.t1 SELECT * FROM s1.t1_tmp;\n".to_string(),
/// ]);
/// assert!(payload.starts_with("BEGIN;\n"));
/// assert!(payload.ends_with("COMMIT;"));
/// ```
pub fn build_transaction(statements: &[String]) -> String {
    let mut payload = String::from("BEGIN;\n");
    for statement in statements {
        payload.push_str(statement);
    }
    payload.push_str("COMMIT;");
    payload
}
