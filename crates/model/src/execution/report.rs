use crate::{execution::stats::ReconciliationStats, tender::category::Category};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ok,
    PartialError,
    Error,
}

/// Outcome of one category within a full run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEntry {
    pub category: Category,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ReconciliationStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunEntry {
    pub fn from_stats(category: Category, stats: ReconciliationStats) -> Self {
        if stats.is_error() {
            let detail = stats
                .error_detail
                .clone()
                .unwrap_or_else(|| "Unknown error from reconciler".to_string());
            Self::failed(category, detail)
        } else {
            Self {
                category,
                ok: true,
                result: Some(stats),
                error: None,
            }
        }
    }

    pub fn failed(category: Category, error: impl Into<String>) -> Self {
        Self {
            category,
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregated outcome of one full sequential pass over every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub entries: Vec<RunEntry>,
}

impl RunStatus {
    pub fn from_entries(entries: &[RunEntry]) -> Self {
        if entries.iter().all(|e| e.ok) {
            RunStatus::Ok
        } else if entries.iter().all(|e| !e.ok) {
            RunStatus::Error
        } else {
            RunStatus::PartialError
        }
    }
}

impl RunReport {
    pub fn new(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        entries: Vec<RunEntry>,
    ) -> Self {
        Self {
            status: RunStatus::from_entries(&entries),
            started_at,
            finished_at,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::stats::SyncStatus;

    fn ok_entry(category: Category) -> RunEntry {
        RunEntry::from_stats(category, ReconciliationStats::default())
    }

    fn failed_entry(category: Category) -> RunEntry {
        let mut stats = ReconciliationStats::default();
        stats.fail("catalog unavailable");
        RunEntry::from_stats(category, stats)
    }

    #[test]
    fn test_status_all_ok() {
        let entries = vec![ok_entry(Category::Active), ok_entry(Category::Closed)];
        assert_eq!(RunStatus::from_entries(&entries), RunStatus::Ok);
    }

    #[test]
    fn test_status_all_failed() {
        let entries = vec![failed_entry(Category::Active), failed_entry(Category::Closed)];
        assert_eq!(RunStatus::from_entries(&entries), RunStatus::Error);
    }

    #[test]
    fn test_status_mixed() {
        let entries = vec![ok_entry(Category::Active), failed_entry(Category::Closed)];
        assert_eq!(RunStatus::from_entries(&entries), RunStatus::PartialError);
    }

    #[test]
    fn test_failed_stats_become_error_entry() {
        let entry = failed_entry(Category::Revoked);
        assert!(!entry.ok);
        assert!(entry.result.is_none());
        assert_eq!(entry.error.as_deref(), Some("catalog unavailable"));
    }

    #[test]
    fn test_entry_wire_shape() {
        let mut stats = ReconciliationStats::default();
        stats.new_count = 2;
        let json = serde_json::to_value(RunEntry::from_stats(Category::Active, stats)).unwrap();
        assert_eq!(json["category"], "activas");
        assert_eq!(json["ok"], true);
        assert_eq!(json["result"]["status"], "ok");
        assert_eq!(json["result"]["new_count"], 2);
        assert!(json.get("error").is_none());
        assert_eq!(SyncStatus::default(), SyncStatus::Ok);
    }
}
