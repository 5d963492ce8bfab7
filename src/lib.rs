//! Translation Portal - interactive translation client and service
//!
//! The library provides a session engine that tracks every submitted text as
//! an ordered, editable and retryable exchange, a translator client that talks
//! to the translation service, and the service itself, which forwards
//! requests to a language-model provider over HTTP.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[allow(missing_docs)]
pub mod core;
#[allow(missing_docs)]
pub mod cli;
#[allow(missing_docs)]
pub mod server;
#[allow(missing_docs)]
pub mod session;

// Re-export key types for convenience
pub use self::core::{
    client::{HttpTranslator, Translator},
    config::{ClientConfig, ServiceConfig},
    errors::{SessionError, TranslationError},
    language::Language,
    models::{ChatRequest, ChatResponse, FailureKind, TranslationFailure, TranslationOutcome},
};

pub use server::{
    provider::{CompletionProvider, OpenAiProvider},
    service::TranslationService,
};

pub use session::{Exchange, ExchangeId, ExchangeStatus, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
