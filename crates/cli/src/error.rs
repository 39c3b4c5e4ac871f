use connectors::error::IndexStoreError;
use engine_config::settings::error::SettingsError;
use engine_runtime::error::RunnerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Sync engine error: {0}")]
    Runner(#[from] RunnerError),

    #[error("Index lookup failed: {0}")]
    Lookup(#[from] IndexStoreError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
