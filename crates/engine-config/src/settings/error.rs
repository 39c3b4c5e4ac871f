use thiserror::Error;

/// Errors raised while loading or validating runtime settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required variable is absent or blank.
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A variable is present but its value can't be used.
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    /// The `.env` file couldn't be read or parsed.
    #[error("Env file error: {0}")]
    EnvFile(String),
}
