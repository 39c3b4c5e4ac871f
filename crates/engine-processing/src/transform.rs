use model::{
    core::date::normalize_timestamp, index::document::IndexDocument, tender::detail::Tender,
};

pub const DEFAULT_CURRENCY: &str = "CLP";
const DETAIL_URL: &str =
    "https://www.mercadopublico.cl/Procurement/Modules/RFB/DetailsAcquisition.aspx?idlicitacion=";

/// Complaint bucket stored with each document.
pub fn complaints_level(count: i64) -> &'static str {
    match count {
        c if c >= 500 => "alto",
        c if c >= 100 => "medio",
        _ => "bajo",
    }
}

pub fn detail_url(id: &str) -> String {
    format!("{DETAIL_URL}{id}")
}

/// Maps a full catalog record into the document shape written to the index.
pub fn to_index_document(tender: &Tender) -> IndexDocument {
    let category = tender
        .items()
        .first()
        .map(|item| item.category.clone())
        .unwrap_or_default();

    let currency = tender
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string();

    IndexDocument {
        id: tender.id.clone(),
        title: tender.name.clone(),
        description: tender.description.clone(),
        entity: tender.buyer.organization_name.clone(),
        region: tender.buyer.region.clone(),
        comuna: tender.buyer.comuna.clone().unwrap_or_default(),
        tender_type: tender.tender_type.clone(),
        status_code: tender.status_code,
        publish_date: normalize_timestamp(tender.dates.published.as_deref()),
        closing_date: normalize_timestamp(tender.dates.closing.as_deref()),
        currency,
        amount: tender.estimated_amount.unwrap_or(0.0),
        category,
        complaints_count: tender.complaints_count,
        complaints_level: complaints_level(tender.complaints_count).to_string(),
        products_count: tender.items().len(),
        url: detail_url(&tender.id),
    }
}
