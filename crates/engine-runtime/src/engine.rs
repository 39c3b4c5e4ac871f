use crate::{coordinator::SequentialRunner, error::RunnerError};
use connectors::{
    error::IndexStoreError, index::IndexStore, index::solr::SolrIndexStore,
    source::mercado_publico::MercadoPublicoClient,
};
use engine_config::settings::Settings;
use engine_core::{
    context::SyncContext,
    metrics::{Metrics, MetricsSnapshot},
    retry::RetryPolicy,
};
use engine_processing::{reconciler::DeltaReconciler, source::RetryingSource};
use model::{
    execution::{report::RunReport, stats::ReconciliationStats},
    index::state::IndexedState,
    tender::category::Category,
};
use std::sync::Arc;
use tracing::info;

/// Entry point shared by the CLI and the admin server.
#[derive(Clone)]
pub struct SyncEngine {
    runner: SequentialRunner,
    index: Arc<dyn IndexStore>,
    metrics: Metrics,
}

impl SyncEngine {
    /// Wires the catalog client (behind the upstream retry policy) and the
    /// Solr store from validated settings.
    pub async fn from_settings(settings: &Settings) -> Result<Self, RunnerError> {
        let metrics = Metrics::new();

        let client = MercadoPublicoClient::new(settings.catalog_config())?;
        let source = RetryingSource::new(client, RetryPolicy::for_upstream())
            .with_metrics(metrics.clone());
        let index = SolrIndexStore::connect(settings.solr_config()).await?;

        info!(
            catalog = %settings.catalog_url,
            core = %settings.solr_core,
            "Sync engine ready"
        );

        let ctx = SyncContext::new(Arc::new(source), Arc::new(index)).with_metrics(metrics);
        Ok(Self::new(ctx))
    }

    pub fn new(ctx: SyncContext) -> Self {
        let index = ctx.index.clone();
        let metrics = ctx.metrics.clone();
        let reconciler = Arc::new(DeltaReconciler::new(ctx));

        Self {
            runner: SequentialRunner::new(reconciler, metrics.clone()),
            index,
            metrics,
        }
    }

    pub async fn sync_category(&self, category: Category) -> ReconciliationStats {
        self.runner.run_category(category).await
    }

    pub async fn run_sequence(&self) -> Result<RunReport, RunnerError> {
        self.runner.run_sequence().await
    }

    pub async fn lookup(&self, id: &str) -> Result<Option<IndexedState>, IndexStoreError> {
        self.index.get_by_id(id).await
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
