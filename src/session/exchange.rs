//! A single tracked translation

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::language::Language;

/// Identifier of an exchange, unique and increasing within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ExchangeId(pub u64);

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for ExchangeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.strip_prefix('#').unwrap_or(s).parse().map(ExchangeId)
    }
}

/// Lifecycle state of an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExchangeStatus {
    Pending,
    Complete,
    Failed,
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeStatus::Pending => write!(f, "pending"),
            ExchangeStatus::Complete => write!(f, "complete"),
            ExchangeStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One user-submitted text and its translation.
///
/// The source text and language pair are fixed at submission. Only the
/// session engine moves the status, and `translated_text` is present
/// exactly when the status is `Complete`.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    id: ExchangeId,
    source_text: String,
    source_language: Language,
    target_language: Language,
    status: ExchangeStatus,
    translated_text: Option<String>,
    attempts: u32,
    created_at: DateTime<Utc>,
}

impl Exchange {
    pub(crate) fn new(
        id: ExchangeId,
        source_text: String,
        source_language: Language,
        target_language: Language,
    ) -> Self {
        Self {
            id,
            source_text,
            source_language,
            target_language,
            status: ExchangeStatus::Pending,
            translated_text: None,
            attempts: 1,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ExchangeId {
        self.id
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn source_language(&self) -> Language {
        self.source_language
    }

    pub fn target_language(&self) -> Language {
        self.target_language
    }

    pub fn status(&self) -> ExchangeStatus {
        self.status
    }

    /// Translation, only while `Complete`
    pub fn translated_text(&self) -> Option<&str> {
        self.translated_text.as_deref()
    }

    /// Number of times this exchange has been sent to the translator
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == ExchangeStatus::Pending
    }

    pub(crate) fn complete(&mut self, translation: String) {
        self.status = ExchangeStatus::Complete;
        self.translated_text = Some(translation);
    }

    pub(crate) fn fail(&mut self) {
        self.status = ExchangeStatus::Failed;
        self.translated_text = None;
    }

    pub(crate) fn restart(&mut self) {
        self.status = ExchangeStatus::Pending;
        self.translated_text = None;
        self.attempts += 1;
    }

    pub(crate) fn replace_translation(&mut self, text: String) {
        self.translated_text = Some(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_id_parsing() {
        assert_eq!("3".parse::<ExchangeId>().unwrap(), ExchangeId(3));
        assert_eq!("#12".parse::<ExchangeId>().unwrap(), ExchangeId(12));
        assert!("abc".parse::<ExchangeId>().is_err());
        assert_eq!(ExchangeId(7).to_string(), "#7");
    }

    #[test]
    fn test_restart_clears_translation_and_counts_attempts() {
        let mut exchange = Exchange::new(
            ExchangeId(1),
            "hello".to_string(),
            Language::English,
            Language::German,
        );
        exchange.fail();
        exchange.restart();

        assert!(exchange.is_pending());
        assert_eq!(exchange.attempts(), 2);
        assert!(exchange.translated_text().is_none());
    }
}
