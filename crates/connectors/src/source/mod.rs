use crate::error::SourceError;
use async_trait::async_trait;
use model::tender::{category::Category, detail::Tender, summary::TenderSummary};

pub mod mercado_publico;

/// Read access to the upstream tender catalog.
#[async_trait]
pub trait TenderSource: Send + Sync {
    /// Lists the summaries of every tender currently in `category`.
    async fn fetch_by_category(&self, category: Category)
    -> Result<Vec<TenderSummary>, SourceError>;

    /// Fetches the full record of one tender; `None` when the catalog does
    /// not know the code.
    async fn fetch_detail(&self, id: &str) -> Result<Option<Tender>, SourceError>;
}
