use crate::{
    error::ReconcileError,
    reconciler::{
        plan::{DeltaPlan, IncomingSet},
        writer::IndexWriter,
    },
    transform::to_index_document,
};
use engine_core::context::SyncContext;
use model::{
    execution::stats::ReconciliationStats, index::state::IndexedState,
    tender::category::Category,
};
use std::{collections::HashMap, mem, time::Instant};
use tracing::{debug, error, info, warn};

pub mod plan;
pub mod writer;

/// Brings the index in line with what the catalog reports for a category.
///
/// New ids get their full record fetched, transformed and upserted; ids whose
/// status changed get a status-only atomic update; everything else is left
/// alone.
pub struct DeltaReconciler {
    ctx: SyncContext,
    writer: IndexWriter,
}

impl DeltaReconciler {
    pub fn new(ctx: SyncContext) -> Self {
        let writer = IndexWriter::new(ctx.index.clone(), ctx.limits.update_chunk());
        Self { ctx, writer }
    }

    /// Never fails: aborting errors are reported through the stats status,
    /// with every counter gathered up to that point kept.
    pub async fn reconcile(&self, category: Category) -> ReconciliationStats {
        let started = Instant::now();
        let mut stats = ReconciliationStats::default();
        info!(category = %category, "Starting delta reconciliation");

        if let Err(e) = self.run(category, &mut stats).await {
            error!(category = %category, error = %e, "Reconciliation aborted");
            stats.fail(e.to_string());
        }

        stats.execution_time_ms = started.elapsed().as_millis() as u64;
        self.ctx.metrics.increment_categories(1);
        self.ctx.metrics.increment_indexed(stats.indexed_new);
        self.ctx.metrics.increment_updates(stats.updated_count);
        self.ctx
            .metrics
            .increment_failures(stats.errors_count + u64::from(stats.is_error()));

        info!(
            category = %category,
            status = ?stats.status,
            found = stats.total_found_api,
            new = stats.new_count,
            indexed = stats.indexed_new,
            updated = stats.updated_count,
            skipped = stats.skipped_count,
            errors = stats.errors_count,
            elapsed_ms = stats.execution_time_ms,
            "Delta reconciliation finished"
        );

        stats
    }

    async fn run(
        &self,
        category: Category,
        stats: &mut ReconciliationStats,
    ) -> Result<(), ReconcileError> {
        let summaries = self
            .ctx
            .source
            .fetch_by_category(category)
            .await
            .map_err(|source| ReconcileError::Fetch { category, source })?;
        stats.total_found_api = summaries.len() as u64;

        let incoming = IncomingSet::from_summaries(summaries);
        if incoming.is_empty() {
            info!(category = %category, "Catalog returned no tenders");
            return Ok(());
        }

        let indexed = self.lookup_indexed(incoming.ids()).await?;
        let plan = DeltaPlan::classify(&incoming, &indexed);
        stats.new_count = plan.new_ids.len() as u64;
        stats.skipped_count = plan.skipped.len() as u64;

        info!(
            category = %category,
            incoming = incoming.len(),
            new = plan.new_ids.len(),
            updates = plan.updates.len(),
            skipped = plan.skipped.len(),
            "Delta computed"
        );

        self.index_new(&plan.new_ids, stats).await;

        let outcome = self.writer.apply_updates(plan.updates).await;
        stats.updated_count += outcome.written;
        stats.errors_count += outcome.failed;

        Ok(())
    }

    async fn lookup_indexed(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, IndexedState>, ReconcileError> {
        let mut indexed = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(self.ctx.limits.lookup_chunk()) {
            let found = self
                .ctx
                .index
                .fetch_minimal_by_ids(chunk)
                .await
                .map_err(ReconcileError::Lookup)?;
            debug!(requested = chunk.len(), found = found.len(), "Indexed state chunk");
            indexed.extend(found);
        }

        Ok(indexed)
    }

    async fn index_new(&self, ids: &[String], stats: &mut ReconciliationStats) {
        let batch_size = self.ctx.limits.upsert_batch();
        let mut buffer = Vec::with_capacity(batch_size.min(ids.len()));
        let mut batch_no = 0;

        for id in ids {
            match self.ctx.source.fetch_detail(id).await {
                Ok(Some(tender)) => buffer.push(to_index_document(&tender)),
                Ok(None) => {
                    warn!(id = %id, "No detail returned for new tender");
                    stats.errors_count += 1;
                }
                Err(e) => {
                    error!(id = %id, error = %e, "Failed to fetch tender detail");
                    stats.errors_count += 1;
                }
            }

            if buffer.len() >= batch_size {
                batch_no += 1;
                let outcome = self
                    .writer
                    .flush_documents(batch_no, mem::take(&mut buffer))
                    .await;
                stats.indexed_new += outcome.written;
                stats.errors_count += outcome.failed;
            }
        }

        if !buffer.is_empty() {
            batch_no += 1;
            let outcome = self.writer.flush_documents(batch_no, buffer).await;
            stats.indexed_new += outcome.written;
            stats.errors_count += outcome.failed;
        }
    }
}
