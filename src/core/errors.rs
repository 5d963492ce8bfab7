//! Custom error types for translation operations

use thiserror::Error;

use crate::session::{ExchangeId, ExchangeStatus};

/// Service-side translation errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Request is missing the source text or the target language
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
    },

    /// Provider answered without usable text
    #[error("Provider returned no translation")]
    UpstreamEmpty,

    /// Provider call failed
    #[error("Upstream error: {source}")]
    UpstreamError {
        #[source]
        source: Box<TranslationError>,
    },

    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after {retry_after:?} seconds")]
    RateLimitError {
        retry_after: Option<u64>,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl TranslationError {
    /// Wrap a provider failure so callers only see a generic upstream error
    pub fn upstream(cause: TranslationError) -> Self {
        TranslationError::UpstreamError {
            source: Box::new(cause),
        }
    }

    /// Message safe to hand to a client. Never contains provider details.
    pub fn public_message(&self) -> &'static str {
        match self {
            TranslationError::BadRequest { .. } => "Source text and target language are required.",
            TranslationError::UpstreamEmpty => "Failed to generate translation.",
            _ => "An error occurred while processing the translation.",
        }
    }
}

/// Local session errors. These guard against misuse and are never shown as a
/// translation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Submitted text was empty or whitespace only
    #[error("Nothing to translate")]
    Validation,

    /// No exchange with that id
    #[error("Exchange {0} not found")]
    NotFound(ExchangeId),

    /// Operation is not allowed in the exchange's current status
    #[error("Cannot {operation} exchange {id} while it is {status}")]
    InvalidState {
        id: ExchangeId,
        status: ExchangeStatus,
        operation: &'static str,
    },

    /// Language code is not in the catalogue
    #[error("Unsupported language: {code}")]
    UnsupportedLanguage {
        code: String,
    },

    /// `auto` chosen as a target language
    #[error("Auto-detect cannot be used as a target language")]
    AutoTarget,

    /// Session created outside a Tokio runtime
    #[error("A session needs a running Tokio runtime to dispatch translations")]
    NoRuntime,
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_message_hides_provider_details() {
        let err = TranslationError::upstream(TranslationError::ApiError {
            status: 401,
            message: "invalid api key sk-secret".to_string(),
        });

        assert!(!err.public_message().contains("sk-secret"));
        assert!(err.to_string().contains("401"));
    }
}
