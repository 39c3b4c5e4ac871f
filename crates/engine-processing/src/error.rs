use connectors::error::{IndexStoreError, SourceError};
use model::tender::category::Category;
use thiserror::Error;

/// Failures that abort the reconciliation of a whole category.
///
/// Per-document and per-chunk failures never surface here; they are
/// absorbed into the stats counters instead.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Failed to fetch '{category}' tenders from the catalog: {source}")]
    Fetch {
        category: Category,
        #[source]
        source: SourceError,
    },

    #[error("Failed to look up indexed state: {0}")]
    Lookup(#[source] IndexStoreError),
}
