//! Translator client used by the session engine

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::ClientConfig;
use crate::core::errors::Result;
use crate::core::language::Language;
use crate::core::models::{
    ChatRequest, ChatResponse, ErrorBody, FailureKind, TranslationFailure, TranslationOutcome,
};

/// Anything that can turn text in one language into text in another.
///
/// Implementations report exactly once per call and never panic; every
/// failure is expressed as a [`TranslationFailure`].
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` into `target`
    async fn translate(&self, text: &str, source: Language, target: Language) -> TranslationOutcome;
}

/// Translator that talks to the translation service over HTTP
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranslator {
    /// Create a new HTTP translator
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        let endpoint = format!("{}/api/chat", config.service_url.trim_end_matches('/'));

        Ok(Self { client, endpoint })
    }

    /// Full URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_request(&self, body: &ChatRequest) -> TranslationOutcome {
        let response = self
            .client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| TranslationFailure::new(FailureKind::Network, e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let parsed: ChatResponse = response.json().await.map_err(|e| {
                TranslationFailure::new(FailureKind::InvalidResponse, e.to_string())
            })?;
            return Ok(parsed.translation);
        }

        let kind = if status == StatusCode::BAD_REQUEST {
            FailureKind::BadRequest
        } else {
            FailureKind::Upstream
        };

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("Service responded with {}", status),
        };

        Err(TranslationFailure::new(kind, message))
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, source: Language, target: Language) -> TranslationOutcome {
        debug!("POST {} ({} -> {}, {} chars)", self.endpoint, source, target, text.len());

        let body = ChatRequest::new(text, source.code(), target.code());
        let result = self.send_request(&body).await;

        if let Err(failure) = &result {
            warn!("Translation request failed: {}", failure);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_normalises_trailing_slash() {
        let config = ClientConfig::default().with_service_url("http://localhost:3001/");
        let translator = HttpTranslator::new(&config).unwrap();
        assert_eq!(translator.endpoint(), "http://localhost:3001/api/chat");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_failure() {
        let config = ClientConfig {
            service_url: "http://127.0.0.1:9".to_string(),
            timeout_ms: 2000,
        };
        let translator = HttpTranslator::new(&config).unwrap();

        let failure = translator
            .translate("hello", Language::English, Language::German)
            .await
            .unwrap_err();

        assert_eq!(failure.kind, FailureKind::Network);
    }
}
