use serde::{Deserialize, Serialize};

/// Full tender record returned by a detail lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    #[serde(rename = "CodigoExterno")]
    pub id: String,

    #[serde(rename = "Nombre", default)]
    pub name: String,

    #[serde(rename = "CodigoEstado")]
    pub status_code: i64,

    #[serde(rename = "Estado", default)]
    pub status: String,

    #[serde(rename = "Descripcion", default)]
    pub description: String,

    #[serde(rename = "Comprador", default)]
    pub buyer: Buyer,

    #[serde(rename = "Fechas", default)]
    pub dates: TenderDates,

    #[serde(rename = "Items", default)]
    pub items: ItemList,

    #[serde(rename = "Moneda", default)]
    pub currency: Option<String>,

    #[serde(rename = "MontoEstimado", default)]
    pub estimated_amount: Option<f64>,

    #[serde(rename = "CantidadReclamos", default)]
    pub complaints_count: i64,

    #[serde(rename = "Tipo", default)]
    pub tender_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    #[serde(rename = "CodigoOrganismo", default)]
    pub organization_code: String,

    #[serde(rename = "NombreOrganismo", default)]
    pub organization_name: String,

    #[serde(rename = "RutUnidad", default)]
    pub unit_rut: String,

    #[serde(rename = "RegionUnidad", default)]
    pub region: String,

    #[serde(rename = "ComunaUnidad", default)]
    pub comuna: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenderDates {
    #[serde(rename = "FechaCreacion", default)]
    pub created: Option<String>,

    #[serde(rename = "FechaCierre", default)]
    pub closing: Option<String>,

    #[serde(rename = "FechaInicio", default)]
    pub start: Option<String>,

    #[serde(rename = "FechaFinal", default)]
    pub end: Option<String>,

    #[serde(rename = "FechaPublicacion", default)]
    pub published: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemList {
    #[serde(rename = "Listado", default)]
    pub items: Vec<TenderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderItem {
    #[serde(rename = "Correlativo", default)]
    pub line: i64,

    #[serde(rename = "CodigoProducto", default)]
    pub product_code: i64,

    #[serde(rename = "NombreProducto", default)]
    pub product_name: Option<String>,

    #[serde(rename = "Descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "Categoria", default)]
    pub category: String,

    #[serde(rename = "UnidadMedida", default)]
    pub unit: Option<String>,

    #[serde(rename = "Cantidad", default)]
    pub quantity: Option<f64>,
}

impl Tender {
    pub fn items(&self) -> &[TenderItem] {
        &self.items.items
    }
}
