use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str = "https://api.mercadopublico.cl/servicios/v1/publico";

/// Connection settings for the tender catalog API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub ticket: String,
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>, ticket: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ticket: ticket.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Connection settings for the Solr core holding the tender index.
#[derive(Debug, Clone)]
pub struct SolrConfig {
    pub base_url: String,
    pub core: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl SolrConfig {
    pub fn new(base_url: impl Into<String>, core: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            core: core.into(),
            username: None,
            password: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn core_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.core)
    }

    /// Basic auth is only used when both halves are present.
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.clone(), pass.clone()))
            }
            _ => None,
        }
    }
}
