use crate::metrics::Metrics;
use connectors::{index::IndexStore, source::TenderSource};
use std::sync::Arc;

pub const DEFAULT_LOOKUP_CHUNK: usize = 200;
pub const DEFAULT_UPSERT_BATCH: usize = 50;
pub const DEFAULT_UPDATE_CHUNK: usize = 500;

/// Batch sizes used while reconciling one category. Every size is at
/// least 1; build through [`SyncLimits::new`] or `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncLimits {
    lookup_chunk: usize,
    upsert_batch: usize,
    update_chunk: usize,
}

impl Default for SyncLimits {
    fn default() -> Self {
        Self {
            lookup_chunk: DEFAULT_LOOKUP_CHUNK,
            upsert_batch: DEFAULT_UPSERT_BATCH,
            update_chunk: DEFAULT_UPDATE_CHUNK,
        }
    }
}

impl SyncLimits {
    /// Zero sizes are coerced to 1.
    pub fn new(lookup_chunk: usize, upsert_batch: usize, update_chunk: usize) -> Self {
        Self {
            lookup_chunk: lookup_chunk.max(1),
            upsert_batch: upsert_batch.max(1),
            update_chunk: update_chunk.max(1),
        }
    }

    /// Ids per minimal-state lookup against the index.
    pub fn lookup_chunk(&self) -> usize {
        self.lookup_chunk
    }

    /// Documents buffered before an upsert flush.
    pub fn upsert_batch(&self) -> usize {
        self.upsert_batch
    }

    /// Payloads per atomic update request.
    pub fn update_chunk(&self) -> usize {
        self.update_chunk
    }
}

/// Collaborators shared by every reconciliation in the process.
#[derive(Clone)]
pub struct SyncContext {
    pub source: Arc<dyn TenderSource>,
    pub index: Arc<dyn IndexStore>,
    pub limits: SyncLimits,
    pub metrics: Metrics,
}

impl SyncContext {
    pub fn new(source: Arc<dyn TenderSource>, index: Arc<dyn IndexStore>) -> Self {
        Self {
            source,
            index,
            limits: SyncLimits::default(),
            metrics: Metrics::new(),
        }
    }

    pub fn with_limits(mut self, limits: SyncLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limits_are_coerced() {
        let limits = SyncLimits::new(0, 0, 7);
        assert_eq!(limits.lookup_chunk(), 1);
        assert_eq!(limits.upsert_batch(), 1);
        assert_eq!(limits.update_chunk(), 7);
    }

    #[test]
    fn test_default_limits() {
        assert_eq!(SyncLimits::default(), SyncLimits::new(200, 50, 500));
    }
}
