use crate::settings::error::SettingsError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Environment variable manager that loads from the process and .env files
#[derive(Debug, Clone, Default)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Load variables from a .env file. File values win over earlier ones.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SettingsError::EnvFile(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse_env_content(&content)
    }

    /// Same as [`EnvManager::load_from_file`] but a missing file is not an error.
    pub fn load_optional<P: AsRef<Path>>(&mut self, path: P) -> Result<bool, SettingsError> {
        if !path.as_ref().exists() {
            return Ok(false);
        }
        self.load_from_file(path)?;
        Ok(true)
    }

    /// Non-blank value for `key`, trimmed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), SettingsError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            let Some((key, value)) = line.split_once('=') else {
                return Err(SettingsError::EnvFile(format!(
                    "malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(SettingsError::EnvFile(format!(
                    "empty key at line {}",
                    line_num + 1
                )));
            }

            self.vars
                .insert(key.to_string(), Self::unquote_value(value));
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }
}
