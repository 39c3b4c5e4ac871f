use serde::{Deserialize, Serialize};

/// One row of the catalog's list endpoint. Only the fields the delta sync
/// compares are kept; the rest of the row is ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderSummary {
    #[serde(rename = "CodigoExterno")]
    pub id: String,

    #[serde(rename = "Nombre", default)]
    pub name: String,

    #[serde(rename = "CodigoEstado")]
    pub status_code: i64,

    /// Raw closing date as sent by the catalog; normalized by the reconciler.
    #[serde(rename = "FechaCierre", default)]
    pub closing_date: Option<String>,
}

impl TenderSummary {
    pub fn new(id: impl Into<String>, status_code: i64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            status_code,
            closing_date: None,
        }
    }

    pub fn with_closing_date(mut self, closing_date: impl Into<String>) -> Self {
        self.closing_date = Some(closing_date.into());
        self
    }
}
