use crate::settings::{env::EnvManager, error::SettingsError};
use connectors::config::{CatalogConfig, DEFAULT_CATALOG_URL, SolrConfig};
use std::{net::SocketAddr, path::Path, time::Duration};
use tracing::debug;

pub mod env;
pub mod error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SOLR_TIMEOUT_SECS: u64 = 10;

/// Validated runtime settings for the ingestion service.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_url: String,
    pub catalog_ticket: String,
    pub catalog_timeout: Duration,
    pub solr_url: String,
    pub solr_core: String,
    pub solr_username: Option<String>,
    pub solr_password: Option<String>,
    pub solr_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub log_level: String,
}

impl Settings {
    /// Reads the process environment, then overlays `env_file` when it exists.
    pub fn load(env_file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut env = EnvManager::from_process();
        let path = env_file.unwrap_or_else(|| Path::new(".env"));
        if env.load_optional(path)? {
            debug!(path = %path.display(), "Loaded env file");
        }
        Self::from_env(&env)
    }

    pub fn from_env(env: &EnvManager) -> Result<Self, SettingsError> {
        Ok(Self {
            catalog_url: env
                .get("MP_BASE_URL")
                .unwrap_or(DEFAULT_CATALOG_URL)
                .trim_end_matches('/')
                .to_string(),
            catalog_ticket: required(env, "MP_TICKET")?,
            catalog_timeout: seconds(env, "MP_TIMEOUT_SECS", DEFAULT_CATALOG_TIMEOUT_SECS)?,
            solr_url: required(env, "SOLR_BASE_URL")?,
            solr_core: required(env, "SOLR_CORE")?,
            solr_username: env.get("SOLR_USERNAME").map(str::to_string),
            solr_password: env.get("SOLR_PASSWORD").map(str::to_string),
            solr_timeout: seconds(env, "SOLR_TIMEOUT_SECS", DEFAULT_SOLR_TIMEOUT_SECS)?,
            bind_addr: env
                .get("BIND_ADDR")
                .unwrap_or(DEFAULT_BIND_ADDR)
                .parse()
                .map_err(|e: std::net::AddrParseError| SettingsError::Invalid {
                    key: "BIND_ADDR",
                    message: e.to_string(),
                })?,
            log_level: env
                .get("LOG_LEVEL")
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_ascii_lowercase(),
        })
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(&self.catalog_url, &self.catalog_ticket)
            .with_timeout(self.catalog_timeout)
    }

    pub fn solr_config(&self) -> SolrConfig {
        SolrConfig::new(&self.solr_url, &self.solr_core)
            .with_credentials(self.solr_username.clone(), self.solr_password.clone())
            .with_timeout(self.solr_timeout)
    }
}

fn required(env: &EnvManager, key: &'static str) -> Result<String, SettingsError> {
    env.get(key)
        .map(str::to_string)
        .ok_or(SettingsError::Missing(key))
}

fn seconds(env: &EnvManager, key: &'static str, default: u64) -> Result<Duration, SettingsError> {
    let Some(raw) = env.get(key) else {
        return Ok(Duration::from_secs(default));
    };

    match raw.parse::<u64>() {
        Ok(0) => Err(SettingsError::Invalid {
            key,
            message: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(SettingsError::Invalid {
            key,
            message: e.to_string(),
        }),
    }
}
