//! Core data models shared by the client and the service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /api/chat`
///
/// Every field is optional on the wire so that the service, not the JSON
/// extractor, decides what a missing field means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_language: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
}

impl ChatRequest {
    pub fn new(
        source: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            source: Some(source.into()),
            source_language: Some(source_language.into()),
            target_language: Some(target_language.into()),
        }
    }
}

/// Successful translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub translation: String,
}

/// Error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Why a translator call failed, as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Service rejected the request
    BadRequest,
    /// Service could not get a translation from its provider
    Upstream,
    /// Service unreachable or timed out
    Network,
    /// Service answered with something other than the expected body
    InvalidResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::BadRequest => write!(f, "bad request"),
            FailureKind::Upstream => write!(f, "upstream"),
            FailureKind::Network => write!(f, "network"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
        }
    }
}

/// Error half of a translator result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TranslationFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TranslationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// What a single translator invocation reports
pub type TranslationOutcome = std::result::Result<String, TranslationFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_uses_camel_case() {
        let request = ChatRequest::new("hello", "en", "de");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["source"], "hello");
        assert_eq!(json["sourceLanguage"], "en");
        assert_eq!(json["targetLanguage"], "de");
    }

    #[test]
    fn test_chat_request_missing_fields() {
        let request: ChatRequest = serde_json::from_str(r#"{"source":"hello"}"#).unwrap();

        assert_eq!(request.source.as_deref(), Some("hello"));
        assert!(request.source_language.is_none());
        assert!(request.target_language.is_none());
    }
}
