use serde::{Deserialize, Serialize};

/// Document written to the search index when a tender is first seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub entity: String,
    pub region: String,
    pub comuna: String,
    #[serde(rename = "type")]
    pub tender_type: String,
    pub status_code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<String>,
    pub currency: String,
    pub amount: f64,
    pub category: String,
    pub complaints_count: i64,
    pub complaints_level: String,
    pub products_count: usize,
    pub url: String,
}
