use crate::retry::classify_source_error;
use async_trait::async_trait;
use connectors::{error::SourceError, source::TenderSource};
use engine_core::{metrics::Metrics, retry::RetryPolicy};
use model::tender::{category::Category, detail::Tender, summary::TenderSummary};
use std::time::Duration;

/// Wraps a catalog source so every call runs under a retry policy.
///
/// Once attempts run out the last error is returned as-is.
pub struct RetryingSource<S> {
    inner: S,
    retry: RetryPolicy,
    metrics: Option<Metrics>,
}

impl<S: TenderSource> RetryingSource<S> {
    pub fn new(inner: S, retry: RetryPolicy) -> Self {
        Self {
            inner,
            retry,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn count_retry(&self) -> impl Fn(usize, Duration) + '_ {
        move |_, _| {
            if let Some(metrics) = &self.metrics {
                metrics.increment_retries(1);
            }
        }
    }
}

#[async_trait]
impl<S: TenderSource> TenderSource for RetryingSource<S> {
    async fn fetch_by_category(&self, category: Category) -> Result<Vec<TenderSummary>, SourceError> {
        self.retry
            .run_observed(
                || self.inner.fetch_by_category(category),
                classify_source_error,
                self.count_retry(),
            )
            .await
            .map_err(|e| e.into_inner())
    }

    async fn fetch_detail(&self, id: &str) -> Result<Option<Tender>, SourceError> {
        self.retry
            .run_observed(
                || self.inner.fetch_detail(id),
                classify_source_error,
                self.count_retry(),
            )
            .await
            .map_err(|e| e.into_inner())
    }
}
