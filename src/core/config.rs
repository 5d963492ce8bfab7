//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_SERVICE_URL: &str = "http://localhost:3001";

/// Configuration for the translation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    pub host: String,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 100,
            timeout_ms: 30000,
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY environment variable is required"))?;

        let config = Self {
            api_key,
            api_endpoint: lookup("OPENAI_API_ENDPOINT").unwrap_or(defaults.api_endpoint),
            model: lookup("OPENAI_MODEL").unwrap_or(defaults.model),
            max_tokens: parse_var(&lookup, "MAX_TOKENS", defaults.max_tokens)?,
            timeout_ms: parse_var(&lookup, "REQUEST_TIMEOUT_MS", defaults.timeout_ms)?,
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!("API key is required"));
        }

        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.model.is_empty() {
            return Err(anyhow::anyhow!("Model is required"));
        }

        if self.max_tokens == 0 {
            return Err(anyhow::anyhow!("max_tokens must be greater than 0"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        Ok(())
    }
}

/// Configuration for the translator client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub service_url: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_ms: 60000,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            service_url: lookup("TRANSLATOR_URL").unwrap_or(defaults.service_url),
            timeout_ms: parse_var(&lookup, "TRANSLATOR_TIMEOUT_MS", defaults.timeout_ms)?,
        })
    }

    /// Override the service URL
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e)),
        None => Ok(default),
    }
}
