use crate::core::value::{scalar_i64, scalar_string};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status used when the index holds no usable status for a document.
/// No catalog status is negative, so it always compares as changed.
pub const STATUS_SENTINEL: i64 = -1;

/// Fields requested by the minimal-field lookup.
pub const MINIMAL_FIELDS: &str = "id,status_code,closing_date";

/// Minimal projection of an indexed tender, used for change detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedState {
    pub id: String,
    pub status_code: i64,
    pub closing_date: Option<String>,
}

impl IndexedState {
    pub fn new(id: impl Into<String>, status_code: i64) -> Self {
        Self {
            id: id.into(),
            status_code,
            closing_date: None,
        }
    }

    /// Builds the canonical state from a raw index document. Multi-valued
    /// fields are collapsed to their first element; a missing or unparseable
    /// status becomes [`STATUS_SENTINEL`]. Returns `None` without an id.
    pub fn from_document(doc: &Map<String, Value>) -> Option<Self> {
        let id = scalar_string(doc.get("id"))?;
        let status_code = scalar_i64(doc.get("status_code")).unwrap_or(STATUS_SENTINEL);
        let closing_date = scalar_string(doc.get("closing_date"));

        Some(Self {
            id,
            status_code,
            closing_date,
        })
    }
}
