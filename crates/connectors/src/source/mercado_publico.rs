use crate::{
    config::CatalogConfig,
    error::{SourceError, truncate_body},
    source::TenderSource,
};
use async_trait::async_trait;
use model::tender::{
    category::Category, detail::Tender, envelope::ListResponse, summary::TenderSummary,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

const LISTING_PATH: &str = "licitaciones.json";

/// HTTP client for the Mercado Público public API.
///
/// Every request carries the account ticket as a query parameter. Calls are
/// not retried here; callers wrap the client in a retry policy.
#[derive(Clone)]
pub struct MercadoPublicoClient {
    http: reqwest::Client,
    endpoint: String,
    ticket: String,
}

impl MercadoPublicoClient {
    pub fn new(config: CatalogConfig) -> Result<Self, SourceError> {
        if config.ticket.trim().is_empty() {
            return Err(SourceError::Config("catalog ticket is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Config(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/{}", config.base_url.trim_end_matches('/'), LISTING_PATH),
            ticket: config.ticket,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<ListResponse<T>, SourceError> {
        debug!(endpoint = %self.endpoint, params = ?params, "Calling catalog");

        let response = self
            .http
            .get(&self.endpoint)
            .query(params)
            .query(&[("ticket", self.ticket.as_str())])
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = truncate_body(response.text().await.unwrap_or_default());
            error!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                body = %body,
                "Catalog returned an error status"
            );
            return Err(SourceError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.network_error(e))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            error!(endpoint = %self.endpoint, error = %e, "Failed to decode catalog response");
            SourceError::UpstreamResponse {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            }
        })
    }

    fn network_error(&self, err: reqwest::Error) -> SourceError {
        // the request URL carries the ticket, keep it out of logs
        let message = err.without_url().to_string();
        error!(endpoint = %self.endpoint, error = %message, "Catalog request failed");
        SourceError::Network {
            endpoint: self.endpoint.clone(),
            message,
        }
    }
}

#[async_trait]
impl TenderSource for MercadoPublicoClient {
    async fn fetch_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<TenderSummary>, SourceError> {
        let response: ListResponse<TenderSummary> =
            self.get(&[("estado", category.as_str())]).await?;
        Ok(response.into_items())
    }

    async fn fetch_detail(&self, id: &str) -> Result<Option<Tender>, SourceError> {
        let response: ListResponse<Tender> = self.get(&[("codigo", id)]).await?;
        Ok(response.into_first())
    }
}
