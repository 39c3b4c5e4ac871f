use crate::error::RunnerError;
use async_trait::async_trait;
use chrono::Utc;
use engine_core::metrics::Metrics;
use engine_processing::reconciler::DeltaReconciler;
use model::{
    execution::{
        report::{RunEntry, RunReport},
        stats::ReconciliationStats,
    },
    tender::category::Category,
};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info, warn};

/// Anything able to reconcile a single category.
#[async_trait]
pub trait CategoryReconciler: Send + Sync + 'static {
    async fn reconcile(&self, category: Category) -> ReconciliationStats;
}

#[async_trait]
impl CategoryReconciler for DeltaReconciler {
    async fn reconcile(&self, category: Category) -> ReconciliationStats {
        DeltaReconciler::reconcile(self, category).await
    }
}

/// Exclusive right to run the full sequence. Released on drop.
pub struct RunPermit {
    _guard: OwnedMutexGuard<()>,
}

/// Runs categories one after another, at most one full sequence at a time.
#[derive(Clone)]
pub struct SequentialRunner {
    reconciler: Arc<dyn CategoryReconciler>,
    permit: Arc<Mutex<()>>,
    metrics: Metrics,
}

impl SequentialRunner {
    pub fn new(reconciler: Arc<dyn CategoryReconciler>, metrics: Metrics) -> Self {
        Self {
            reconciler,
            permit: Arc::new(Mutex::new(())),
            metrics,
        }
    }

    /// Fails immediately when the permit is held; there is no queue.
    pub fn try_acquire(&self) -> Result<RunPermit, RunnerError> {
        self.permit
            .clone()
            .try_lock_owned()
            .map(|guard| RunPermit { _guard: guard })
            .map_err(|_| RunnerError::AlreadyRunning)
    }

    pub fn is_running(&self) -> bool {
        self.permit.try_lock().is_err()
    }

    /// Runs every category in [`Category::SEQUENCE`] order.
    ///
    /// The sequence is driven by a detached task holding the permit, so a
    /// caller that goes away does not cut the run short.
    pub async fn run_sequence(&self) -> Result<RunReport, RunnerError> {
        let permit = match self.try_acquire() {
            Ok(permit) => permit,
            Err(e) => {
                warn!("Rejected full run: another run holds the permit");
                self.metrics.increment_rejections();
                return Err(e);
            }
        };

        let runner = self.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            runner.sequence().await
        });

        Ok(handle.await?)
    }

    /// Reconciles one category outside the sequence permit.
    pub async fn run_category(&self, category: Category) -> ReconciliationStats {
        match self.isolated(category).await {
            Ok(stats) => stats,
            Err(detail) => {
                let mut stats = ReconciliationStats::default();
                stats.fail(detail);
                stats
            }
        }
    }

    async fn sequence(&self) -> RunReport {
        self.metrics.increment_runs();
        let started_at = Utc::now();
        info!(started_at = %started_at.to_rfc3339(), "Starting full ingestion sequence");

        let mut entries = Vec::with_capacity(Category::SEQUENCE.len());
        for category in Category::SEQUENCE {
            let entry = match self.isolated(category).await {
                Ok(stats) => RunEntry::from_stats(category, stats),
                Err(detail) => RunEntry::failed(category, detail),
            };
            if !entry.ok {
                warn!(category = %category, error = ?entry.error, "Category failed");
            }
            entries.push(entry);
        }

        let report = RunReport::new(started_at, Utc::now(), entries);
        info!(status = ?report.status, "Full ingestion sequence finished");
        report
    }

    /// A panic inside the reconciler becomes an error message for that
    /// category instead of tearing down the sequence.
    async fn isolated(&self, category: Category) -> Result<ReconciliationStats, String> {
        let reconciler = self.reconciler.clone();
        tokio::spawn(async move { reconciler.reconcile(category).await })
            .await
            .map_err(|e| {
                error!(category = %category, error = %e, "Reconciliation task failed");
                format!("Reconciliation task failed: {e}")
            })
    }
}
