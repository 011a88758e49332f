//! Destination protocol version enumeration
//!
//! A destination commits to one protocol generation for its lifetime, so
//! the version is resolved once per operations instance rather than per
//! call. Branching per call would risk mixed-version tables within one
//! sync.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination table protocol generation
///
/// - V1: legacy raw layout `{id, data, timestamp}`
/// - V2: typed/deduplicated layout `{raw_id, data, extracted_at,
///   loaded_at, meta}` with extraction and load timestamps plus a
///   per-record metadata column
///
/// # Examples
///
/// ```
/// use sqldest::catalog::ProtocolVersion;
///
/// let version = ProtocolVersion::from_v2_flag(true);
/// assert_eq!(version, ProtocolVersion::V2);
/// assert!(version.is_v2());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// Legacy raw table layout
    V1,
    /// Typed/deduplicated table layout
    V2,
}

impl ProtocolVersion {
    /// Resolve the version from the destination's V2 protocol flag
    pub fn from_v2_flag(is_v2: bool) -> Self {
        if is_v2 {
            ProtocolVersion::V2
        } else {
            ProtocolVersion::V1
        }
    }

    /// True for the typed/deduplicated generation
    pub fn is_v2(&self) -> bool {
        matches!(self, ProtocolVersion::V2)
    }

    /// Get the string representation of the protocol version
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolVersion::V1 => "v1",
            ProtocolVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
