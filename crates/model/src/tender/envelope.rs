use serde::{Deserialize, Serialize};

/// Envelope shared by every catalog response (`licitaciones.json`).
///
/// `Cantidad` and `Listado` are required: the catalog answers some failures
/// (bad ticket, quota) with HTTP 200 and a `{Codigo, Mensaje}` body, which
/// must not decode as an empty listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(rename = "Cantidad")]
    pub count: u64,

    #[serde(rename = "FechaCreacion", default)]
    pub created_at: Option<String>,

    #[serde(rename = "Version", default)]
    pub version: Option<String>,

    #[serde(rename = "Listado")]
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Detail lookups answer with a one-element list, or an empty one when
    /// the code is unknown.
    pub fn into_first(self) -> Option<T> {
        self.items.into_iter().next()
    }
}
