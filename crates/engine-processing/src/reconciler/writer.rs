use connectors::index::IndexStore;
use model::index::{document::IndexDocument, update::UpdatePayload};
use std::sync::Arc;
use tracing::{error, info};

/// Counts for one write submitted to the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    pub written: u64,
    pub failed: u64,
}

impl WriteOutcome {
    fn ok(count: usize) -> Self {
        Self {
            written: count as u64,
            failed: 0,
        }
    }

    fn failed(count: usize) -> Self {
        Self {
            written: 0,
            failed: count as u64,
        }
    }

    fn merge(&mut self, other: WriteOutcome) {
        self.written += other.written;
        self.failed += other.failed;
    }
}

/// Submits upsert batches and update chunks, absorbing failures into counts.
/// A failed call never stops the batches that follow.
pub struct IndexWriter {
    index: Arc<dyn IndexStore>,
    update_chunk: usize,
}

impl IndexWriter {
    pub fn new(index: Arc<dyn IndexStore>, update_chunk: usize) -> Self {
        Self {
            index,
            update_chunk: update_chunk.max(1),
        }
    }

    pub async fn flush_documents(&self, batch: usize, docs: Vec<IndexDocument>) -> WriteOutcome {
        let count = docs.len();
        if count == 0 {
            return WriteOutcome::default();
        }

        match self.index.upsert_many(docs).await {
            Ok(()) => {
                info!(batch, docs = count, "Upserted new documents");
                WriteOutcome::ok(count)
            }
            Err(e) => {
                error!(batch, docs = count, error = %e, "Upsert flush failed");
                WriteOutcome::failed(count)
            }
        }
    }

    pub async fn apply_updates(&self, payloads: Vec<UpdatePayload>) -> WriteOutcome {
        let mut outcome = WriteOutcome::default();

        for (chunk_no, chunk) in payloads.chunks(self.update_chunk).enumerate() {
            let count = chunk.len();
            let result = match self.index.atomic_update_many(chunk.to_vec()).await {
                Ok(()) => {
                    info!(chunk = chunk_no + 1, payloads = count, "Applied status updates");
                    WriteOutcome::ok(count)
                }
                Err(e) => {
                    error!(
                        chunk = chunk_no + 1,
                        payloads = count,
                        error = %e,
                        "Status update chunk failed"
                    );
                    WriteOutcome::failed(count)
                }
            };
            outcome.merge(result);
        }

        outcome
    }
}
