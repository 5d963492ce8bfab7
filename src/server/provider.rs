//! Language-model provider used by the translation service

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::config::ServiceConfig;
use crate::core::errors::{Result, TranslationError};

/// Something that turns a prompt into generated text.
///
/// `Ok(None)` means the provider answered but produced nothing usable.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Option<String>>;
}

/// OpenAI chat-completions provider
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    api_endpoint: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Create a new provider client
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| TranslationError::ConfigError {
                message: e.to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_endpoint: config.api_endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": prompt,
            }],
            "max_tokens": self.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        debug!("Calling {} with model {}", self.api_endpoint, self.model);

        let response = self
            .client
            .post(&self.api_endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::TimeoutError
                } else {
                    TranslationError::NetworkError {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            return Err(TranslationError::RateLimitError { retry_after });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranslationError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| TranslationError::InvalidResponseError {
                    message: e.to_string(),
                })?;

        Ok(extract_text(&json))
    }
}

/// Pull the generated text out of a chat-completions response
fn extract_text(json: &serde_json::Value) -> Option<String> {
    json["choices"]
        .get(0)
        .and_then(|choice| {
            choice["message"]["content"]
                .as_str()
                .or_else(|| choice["text"].as_str())
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAiProvider {
        let config = ServiceConfig {
            api_key: "test_key".to_string(),
            model: "test-model".to_string(),
            max_tokens: 64,
            ..Default::default()
        };
        OpenAiProvider::new(&config).unwrap()
    }

    #[test]
    fn test_request_body() {
        let body = provider().request_body("Translate this");

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 64);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Translate this");
    }

    #[test]
    fn test_extract_text() {
        let chat = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": " Hallo "}}]
        });
        assert_eq!(extract_text(&chat).as_deref(), Some(" Hallo "));

        let legacy = serde_json::json!({"choices": [{"text": "Hallo"}]});
        assert_eq!(extract_text(&legacy).as_deref(), Some("Hallo"));

        let empty = serde_json::json!({"choices": []});
        assert!(extract_text(&empty).is_none());
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = OpenAiProvider::new(&ServiceConfig::default());
        assert!(matches!(result, Err(TranslationError::ConfigError { .. })));
    }
}
