use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::llm::DEFAULT_ENDPOINT;

pub const TOKEN_ENV_VAR: &str = "HF_API_TOKEN";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_token: Option<String>,
    pub endpoint: Option<String>,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("compactify"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            Self::parse(&content)
        } else {
            Ok(Config::default())
        }
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).with_context(|| "Failed to parse config file")?;
        if let Some(endpoint) = &config.endpoint {
            validate_endpoint(endpoint)?;
        }
        Ok(config)
    }

    /// Save config to file with secure permissions (600)
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Config path has no parent directory"))?;

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&path, &content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        // Owner read/write only, the file holds the API token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)
                .with_context(|| "Failed to set config file permissions")?;
        }

        Ok(())
    }

    /// Check if an API token is configured
    pub fn has_api_token(&self) -> bool {
        self.get_api_token().is_some()
    }

    /// Get the API token, checking the environment variable as fallback
    pub fn get_api_token(&self) -> Option<String> {
        self.api_token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()))
    }

    /// Endpoint to send summarize requests to
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Set a custom endpoint after checking it is an http(s) URL
    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<()> {
        validate_endpoint(endpoint)?;
        self.endpoint = Some(endpoint.to_string());
        Ok(())
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = url::Url::parse(endpoint)
        .with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Endpoint must be an http(s) URL, got {}", url.scheme());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = Config::default();
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_parse_config_file() {
        let config = Config::parse(
            r#"
api_token = "hf_abc"
endpoint = "https://example.com/models/bart"
"#,
        )
        .unwrap();
        assert_eq!(config.get_api_token().as_deref(), Some("hf_abc"));
        assert_eq!(config.endpoint(), "https://example.com/models/bart");
    }

    #[test]
    fn test_parse_rejects_bad_endpoint() {
        assert!(Config::parse(r#"endpoint = "not a url""#).is_err());
        assert!(Config::parse(r#"endpoint = "ftp://example.com""#).is_err());
    }

    #[test]
    fn test_set_endpoint() {
        let mut config = Config::default();
        assert!(config.set_endpoint("file:///etc/passwd").is_err());
        assert!(config.endpoint.is_none());

        config.set_endpoint("http://localhost:8080/summarize").unwrap();
        assert_eq!(config.endpoint(), "http://localhost:8080/summarize");
    }
}
