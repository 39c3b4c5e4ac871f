use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Ok,
    Error,
}

/// Outcome of reconciling one category against the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationStats {
    pub status: SyncStatus,
    /// Summaries returned by the catalog for the category.
    pub total_found_api: u64,
    /// Ids not present in the index.
    pub new_count: u64,
    /// New documents that were actually written.
    pub indexed_new: u64,
    /// Status updates in successfully applied chunks.
    pub updated_count: u64,
    pub skipped_count: u64,
    pub errors_count: u64,
    pub execution_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl ReconciliationStats {
    pub fn is_error(&self) -> bool {
        self.status == SyncStatus::Error
    }

    /// Marks the stats as failed, keeping every counter gathered so far.
    pub fn fail(&mut self, detail: impl Into<String>) {
        self.status = SyncStatus::Error;
        self.error_detail = Some(detail.into());
    }
}
