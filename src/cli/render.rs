//! Terminal rendering of a session

use crate::core::language::Language;
use crate::session::{Exchange, ExchangeStatus, Session};

/// Render one exchange as a block of lines
pub fn render_exchange(exchange: &Exchange) -> String {
    let marker = match exchange.status() {
        ExchangeStatus::Pending => "…",
        ExchangeStatus::Complete => "✓",
        ExchangeStatus::Failed => "✗",
    };

    let mut out = format!(
        "{} {} [{} → {}]\n",
        marker,
        exchange.id(),
        exchange.source_language().label(),
        exchange.target_language().label()
    );

    for line in exchange.source_text().lines() {
        out.push_str(&format!("    {}\n", line));
    }

    match exchange.status() {
        ExchangeStatus::Pending => out.push_str("  ⇢ translating...\n"),
        ExchangeStatus::Complete => {
            for line in exchange.translated_text().unwrap_or_default().lines() {
                out.push_str(&format!("  ⇢ {}\n", line));
            }
        }
        ExchangeStatus::Failed => out.push_str(&format!(
            "  ⇢ translation failed, retry with /retry {}\n",
            exchange.id().0
        )),
    }

    out
}

/// Render the whole history in submission order
pub fn render_history(session: &Session) -> String {
    if session.exchanges().is_empty() {
        return "No translations yet.\n".to_string();
    }

    session
        .exchanges()
        .iter()
        .map(render_exchange)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Current language pair, e.g. `Auto-detect → German`
pub fn render_language_pair(session: &Session) -> String {
    format!(
        "{} → {}",
        session.source_language().label(),
        session.target_language().label()
    )
}

/// Table of supported language codes
pub fn render_languages() -> String {
    Language::ALL
        .iter()
        .map(|lang| format!("  {:<5} {}", lang.code(), lang.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::Translator;
    use crate::core::models::{FailureKind, TranslationFailure, TranslationOutcome};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl Translator for Echo {
        async fn translate(&self, text: &str, _source: Language, _target: Language) -> TranslationOutcome {
            if text == "fail" {
                Err(TranslationFailure::new(FailureKind::Upstream, "nope"))
            } else {
                Ok(text.to_uppercase())
            }
        }
    }

    #[tokio::test]
    async fn test_render_history_in_order() {
        let mut session = Session::new(Arc::new(Echo)).unwrap();
        session.submit("hello").unwrap();
        session.submit("fail").unwrap();
        session.settle().await;

        let history = render_history(&session);

        let first = history.find("✓ #1").unwrap();
        let second = history.find("✗ #2").unwrap();
        assert!(first < second);
        assert!(history.contains("⇢ HELLO"));
        assert!(history.contains("/retry 2"));
        assert!(!history.contains("nope"));
    }

    #[tokio::test]
    async fn test_render_pending_exchange() {
        let mut session = Session::new(Arc::new(Echo)).unwrap();
        let id = session.submit("hello").unwrap();

        let rendered = render_exchange(session.get(id).unwrap());
        assert!(rendered.starts_with("… #1 [Auto-detect → German]"));
        assert!(rendered.contains("translating"));
    }

    #[test]
    fn test_render_languages_lists_catalogue() {
        let table = render_languages();
        assert_eq!(table.lines().count(), Language::ALL.len());
        assert!(table.contains("de    German"));
    }
}
