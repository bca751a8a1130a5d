/// Export tool configuration
use crate::error::{ExportError, Result};
use clarify_client::{ClientConfig, DEFAULT_HOST};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default)]
    pub key: String,

    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            host: default_host(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

// Values stay strings: API keys may look like numbers.
fn environment() -> config::Environment {
    config::Environment::with_prefix("CLARIFY").separator("_")
}

impl ExportConfig {
    /// Load configuration from an optional TOML file and the environment
    /// (`CLARIFY_API_KEY`, `CLARIFY_API_HOST`).
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_from(file, environment())
    }

    fn load_from(file: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(file) = file {
            settings = settings.add_source(config::File::from(file));
        } else {
            settings = settings.add_source(config::File::with_name("clarify").required(false));
        }

        let config = settings
            .add_source(environment)
            .build()
            .map_err(|e| ExportError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ExportError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.key.trim().is_empty() {
            return Err(ExportError::Config(
                "API key is required (set CLARIFY_API_KEY or pass --api-key)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.key.clone()).with_host(self.api.host.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validate_requires_key() {
        let config = ExportConfig::default();
        assert!(matches!(config.validate(), Err(ExportError::Config(_))));

        let mut config = ExportConfig::default();
        config.api.key = "my-api-key".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.client_config().host, DEFAULT_HOST);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clarify.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nkey = \"file-key\"\nhost = \"http://localhost:9000\"").unwrap();

        let config = ExportConfig::load(Some(&path)).unwrap();
        assert_eq!(config.api.host, "http://localhost:9000");
        assert!(!config.api.key.is_empty());
    }

    #[test]
    fn test_numeric_looking_key_stays_verbatim() {
        let mut vars = config::Map::new();
        vars.insert("CLARIFY_API_KEY".to_string(), "1e5".to_string());
        vars.insert("CLARIFY_API_HOST".to_string(), "http://localhost:9000".to_string());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clarify.toml");
        std::fs::write(&path, "").unwrap();

        let config =
            ExportConfig::load_from(Some(&path), environment().source(Some(vars))).unwrap();
        assert_eq!(config.api.key, "1e5");
        assert_eq!(config.api.host, "http://localhost:9000");
    }
}
