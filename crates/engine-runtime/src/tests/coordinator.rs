#[cfg(test)]
mod tests {
    use crate::{
        coordinator::{CategoryReconciler, SequentialRunner},
        error::RunnerError,
    };
    use async_trait::async_trait;
    use engine_core::metrics::Metrics;
    use model::{
        execution::{report::RunStatus, stats::ReconciliationStats},
        tender::category::Category,
    };
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    // Records the order categories are reconciled in and fails the ones asked to
    struct MockReconciler {
        seen: Arc<Mutex<Vec<Category>>>,
        failing: Vec<Category>,
        panicking: Vec<Category>,
    }

    impl MockReconciler {
        fn new() -> Self {
            Self {
                seen: Arc::new(Mutex::new(Vec::new())),
                failing: Vec::new(),
                panicking: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl CategoryReconciler for MockReconciler {
        async fn reconcile(&self, category: Category) -> ReconciliationStats {
            self.seen.lock().unwrap().push(category);

            if self.panicking.contains(&category) {
                panic!("reconciler blew up");
            }

            let mut stats = ReconciliationStats {
                total_found_api: 1,
                skipped_count: 1,
                ..Default::default()
            };
            if self.failing.contains(&category) {
                stats.fail("catalog unavailable");
            }
            stats
        }
    }

    // Blocks inside the first category until released
    struct GatedReconciler {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl CategoryReconciler for GatedReconciler {
        async fn reconcile(&self, category: Category) -> ReconciliationStats {
            if category == Category::Active {
                self.entered.notify_one();
                self.release.notified().await;
            }
            ReconciliationStats::default()
        }
    }

    #[tokio::test]
    async fn test_categories_run_in_fixed_order() {
        let reconciler = MockReconciler::new();
        let seen = reconciler.seen.clone();
        let runner = SequentialRunner::new(Arc::new(reconciler), Metrics::new());

        let report = runner.run_sequence().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), Category::SEQUENCE.to_vec());
        assert_eq!(report.status, RunStatus::Ok);
        assert_eq!(report.entries.len(), 7);
        assert!(report.started_at <= report.finished_at);
        assert!(report.entries.iter().all(|e| e.result.is_some()));
    }

    #[tokio::test]
    async fn test_failed_category_does_not_stop_the_sequence() {
        let mut reconciler = MockReconciler::new();
        reconciler.failing = vec![Category::Closed];
        let runner = SequentialRunner::new(Arc::new(reconciler), Metrics::new());

        let report = runner.run_sequence().await.unwrap();

        assert_eq!(report.status, RunStatus::PartialError);
        let closed = &report.entries[2];
        assert_eq!(closed.category, Category::Closed);
        assert!(!closed.ok);
        assert_eq!(closed.error.as_deref(), Some("catalog unavailable"));
        assert!(closed.result.is_none());
        assert!(report.entries[3].ok);
    }

    #[tokio::test]
    async fn test_every_category_failing_is_an_error_run() {
        let mut reconciler = MockReconciler::new();
        reconciler.failing = Category::SEQUENCE.to_vec();
        let runner = SequentialRunner::new(Arc::new(reconciler), Metrics::new());

        let report = runner.run_sequence().await.unwrap();
        assert_eq!(report.status, RunStatus::Error);
    }

    #[tokio::test]
    async fn test_panicking_category_becomes_error_entry_and_releases_permit() {
        let mut reconciler = MockReconciler::new();
        reconciler.panicking = vec![Category::Published];
        let runner = SequentialRunner::new(Arc::new(reconciler), Metrics::new());

        let report = runner.run_sequence().await.unwrap();

        assert_eq!(report.status, RunStatus::PartialError);
        assert!(!report.entries[1].ok);
        assert!(report.entries[1].error.is_some());
        assert!(!runner.is_running());
        assert!(runner.run_sequence().await.is_ok());
    }

    #[tokio::test]
    async fn test_second_run_is_rejected_while_first_is_in_flight() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let metrics = Metrics::new();
        let runner = SequentialRunner::new(
            Arc::new(GatedReconciler {
                entered: entered.clone(),
                release: release.clone(),
            }),
            metrics.clone(),
        );

        let first = tokio::spawn({
            let runner = runner.clone();
            async move { runner.run_sequence().await }
        });
        entered.notified().await;

        assert!(runner.is_running());
        let second = runner.run_sequence().await;
        assert!(matches!(second, Err(RunnerError::AlreadyRunning)));

        release.notify_one();
        let report = first.await.unwrap().unwrap();

        assert_eq!(report.status, RunStatus::Ok);
        assert_eq!(report.entries.len(), 7);
        assert!(!runner.is_running());
        assert_eq!(metrics.snapshot().runs_rejected, 1);
        assert_eq!(metrics.snapshot().runs_started, 1);
    }

    #[tokio::test]
    async fn test_single_category_panic_is_reported_as_error_stats() {
        let mut reconciler = MockReconciler::new();
        reconciler.panicking = vec![Category::Awarded];
        let runner = SequentialRunner::new(Arc::new(reconciler), Metrics::new());

        let stats = runner.run_category(Category::Awarded).await;

        assert!(stats.is_error());
        assert!(stats.error_detail.is_some());
    }
}
