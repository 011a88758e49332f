//! Database error classification.
//!
//! When a database call fails we may recognize the failure as an issue
//! with the user's permissions or other configuration options. In those
//! cases the error is reclassified as a [`ConfigError`] so that it is
//! excluded from on-call paging and reported to the user with an
//! actionable message instead. Unrecognized errors propagate unchanged.

use crate::errors::{ConfigError, DatabaseError};

/// Decides whether a database error is really a destination
/// misconfiguration.
///
/// The base behavior never reclassifies. Dialect implementations override
/// [`classify`](ErrorClassifier::classify) to match known signatures,
/// typically by SQLSTATE.
///
/// This is a pure decision function: it never retries and never
/// suppresses an error.
pub trait ErrorClassifier: Send + Sync {
    /// Return a configuration error to raise in place of `error`, or
    /// `None` to let the original propagate.
    fn classify(&self, error: &DatabaseError) -> Option<ConfigError> {
        let _ = error;
        None
    }
}

/// Classifier that never reclassifies anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughClassifier;

impl ErrorClassifier for PassthroughClassifier {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample dialect classifier matching Postgres-style SQLSTATEs.
    struct PgClassifier;

    impl ErrorClassifier for PgClassifier {
        fn classify(&self, error: &DatabaseError) -> Option<ConfigError> {
            match error.sqlstate() {
                Some("42501") => Some(ConfigError::new(
                    "the configured role lacks permission on the destination schema; \
                     grant CREATE and USAGE to it",
                )),
                Some("3F000") => Some(ConfigError::new(
                    "the destination schema does not exist and the role cannot create it",
                )),
                _ => None,
            }
        }
    }

    #[test]
    fn test_passthrough_never_reclassifies() {
        let err = DatabaseError::with_sqlstate("permission denied", "42501");
        assert!(PassthroughClassifier.classify(&err).is_none());
    }

    #[test]
    fn test_known_signature_reclassified() {
        let err = DatabaseError::with_sqlstate("permission denied for schema s1", "42501");
        let config = PgClassifier.classify(&err).expect("should reclassify");
        assert!(!config.message().is_empty());
    }

    #[test]
    fn test_unknown_signature_passes_through() {
        let err = DatabaseError::with_sqlstate("deadlock detected", "40P01");
        assert!(PgClassifier.classify(&err).is_none());

        let err = DatabaseError::new("connection reset");
        assert!(PgClassifier.classify(&err).is_none());
    }
}
