//! Stateless translation service: validates a request, asks the provider,
//! and classifies the outcome

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::core::errors::{Result, TranslationError};
use crate::core::language::Language;
use crate::core::models::{ChatRequest, ChatResponse};
use crate::server::provider::CompletionProvider;

/// Translation request handler shared by every HTTP worker
#[derive(Clone)]
pub struct TranslationService {
    provider: Arc<dyn CompletionProvider>,
}

impl TranslationService {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Translate a single request with exactly one provider call
    pub async fn translate(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let source = non_blank(request.source.as_deref()).ok_or_else(|| {
            TranslationError::BadRequest {
                message: "source is required".to_string(),
            }
        })?;
        let target = non_blank(request.target_language.as_deref()).ok_or_else(|| {
            TranslationError::BadRequest {
                message: "targetLanguage is required".to_string(),
            }
        })?;

        let prompt = build_prompt(source, request.source_language.as_deref(), target);
        debug!("Translating {} chars into {}", source.len(), target);

        match self.provider.complete(&prompt).await {
            Ok(Some(text)) if !text.trim().is_empty() => Ok(ChatResponse {
                translation: text.trim().to_string(),
            }),
            Ok(_) => {
                warn!("Provider returned no translation for target {}", target);
                Err(TranslationError::UpstreamEmpty)
            }
            Err(e) => {
                error!("Error during translation: {}", e);
                Err(TranslationError::upstream(e))
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Catalogue label for a known code, the raw code otherwise
fn language_name(code: &str) -> String {
    code.parse::<Language>()
        .map(|lang| lang.label().to_string())
        .unwrap_or_else(|_| code.trim().to_string())
}

/// Instruction sent to the provider
pub fn build_prompt(source: &str, source_language: Option<&str>, target_language: &str) -> String {
    let target = language_name(target_language);

    let from = non_blank(source_language)
        .filter(|code| !code.trim().eq_ignore_ascii_case(Language::Auto.code()));

    match from {
        Some(code) => format!(
            "Translate the following text from {} to {}: \"{}\"",
            language_name(code),
            target,
            source
        ),
        None => format!("Translate the following text to {}: \"{}\"", target, source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    enum Reply {
        Text(&'static str),
        Nothing,
        Fail,
    }

    struct StubProvider {
        reply: Reply,
        prompts: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, prompt: &str) -> Result<Option<String>> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Reply::Text(text) => Ok(Some(text.to_string())),
                Reply::Nothing => Ok(None),
                Reply::Fail => Err(TranslationError::ApiError {
                    status: 401,
                    message: "bad key".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_translate_success_trims_text() {
        let provider = StubProvider::new(Reply::Text("  hallo\n"));
        let service = TranslationService::new(provider.clone());

        let response = service
            .translate(&ChatRequest::new("hello", "en", "de"))
            .await
            .unwrap();

        assert_eq!(response.translation, "hallo");
        assert_eq!(
            *provider.prompts.lock().unwrap(),
            vec!["Translate the following text from English to German: \"hello\"".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_requests() {
        let provider = StubProvider::new(Reply::Text("hallo"));
        let service = TranslationService::new(provider.clone());

        let missing_target = ChatRequest {
            target_language: None,
            ..ChatRequest::new("hello", "en", "de")
        };
        let blank_source = ChatRequest::new("   ", "en", "de");

        for request in [missing_target, blank_source, ChatRequest::default()] {
            let err = service.translate(&request).await.unwrap_err();
            assert!(matches!(err, TranslationError::BadRequest { .. }));
        }
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_provider_output() {
        for reply in [Reply::Nothing, Reply::Text("   ")] {
            let service = TranslationService::new(StubProvider::new(reply));
            let err = service
                .translate(&ChatRequest::new("hello", "en", "de"))
                .await
                .unwrap_err();
            assert!(matches!(err, TranslationError::UpstreamEmpty));
        }
    }

    #[tokio::test]
    async fn test_provider_failure_is_wrapped() {
        let provider = StubProvider::new(Reply::Fail);
        let service = TranslationService::new(provider.clone());

        let err = service
            .translate(&ChatRequest::new("hello", "en", "de"))
            .await
            .unwrap_err();

        assert!(matches!(err, TranslationError::UpstreamError { .. }));
        assert_eq!(provider.prompts.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_build_prompt_language_names() {
        assert_eq!(
            build_prompt("hi", Some("auto"), "ja"),
            "Translate the following text to Japanese: \"hi\""
        );
        assert_eq!(
            build_prompt("hi", None, "de"),
            "Translate the following text to German: \"hi\""
        );
        assert_eq!(
            build_prompt("hi", Some("en"), "sw"),
            "Translate the following text from English to sw: \"hi\""
        );
    }
}
