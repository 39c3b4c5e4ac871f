use connectors::error::{IndexStoreError, SourceError};
use thiserror::Error;

/// Top-level errors for the ingestion runtime.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A full run was requested while another one holds the run permit.
    #[error("Daily ingestion already running")]
    AlreadyRunning,

    /// The task driving a run was cancelled or panicked.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Catalog client error: {0}")]
    Source(#[from] SourceError),

    #[error("Index store error: {0}")]
    Index(#[from] IndexStoreError),
}
