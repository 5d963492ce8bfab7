//! Session engine: the ordered history of translation exchanges
//!
//! A [`Session`] owns every exchange the user has submitted, the language
//! pair currently selected and the draft input buffer. Translations run as
//! spawned tasks; their results come back over a channel and are applied only
//! when the owner of the session drains it, so all mutation stays on one side.

mod exchange;

pub use exchange::{Exchange, ExchangeId, ExchangeStatus};

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::client::Translator;
use crate::core::errors::SessionError;
use crate::core::language::Language;
use crate::core::models::TranslationOutcome;

/// Result of one translator dispatch, routed back to the session
#[derive(Debug)]
pub struct Completion {
    pub id: ExchangeId,
    pub attempt: u32,
    pub outcome: TranslationOutcome,
}

/// Interactive translation session
pub struct Session {
    translator: Arc<dyn Translator>,
    runtime: Handle,
    exchanges: Vec<Exchange>,
    next_id: u64,
    source_language: Language,
    target_language: Language,
    draft_text: String,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl Session {
    /// Create a session translating from auto-detect into German.
    ///
    /// Must be called inside a Tokio runtime; translations are spawned on
    /// that runtime even when `submit` is later called from sync code.
    pub fn new(translator: Arc<dyn Translator>) -> Result<Self, SessionError> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Ok(Self {
            translator,
            runtime,
            exchanges: Vec::new(),
            next_id: 1,
            source_language: Language::Auto,
            target_language: Language::German,
            draft_text: String::new(),
            completions_tx,
            completions_rx,
        })
    }

    /// Create a session with a given language pair
    pub fn with_languages(
        translator: Arc<dyn Translator>,
        source: Language,
        target: Language,
    ) -> Result<Self, SessionError> {
        if target.is_auto() {
            return Err(SessionError::AutoTarget);
        }
        let mut session = Self::new(translator)?;
        session.source_language = source;
        session.target_language = target;
        Ok(session)
    }

    /// Exchanges in submission order
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn get(&self, id: ExchangeId) -> Option<&Exchange> {
        self.position(id).map(|idx| &self.exchanges[idx])
    }

    pub fn source_language(&self) -> Language {
        self.source_language
    }

    pub fn target_language(&self) -> Language {
        self.target_language
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    /// Replace the not-yet-submitted input buffer
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    pub fn pending_count(&self) -> usize {
        self.exchanges.iter().filter(|e| e.is_pending()).count()
    }

    pub fn has_pending(&self) -> bool {
        self.exchanges.iter().any(Exchange::is_pending)
    }

    /// Submit `text` for translation with the current language pair.
    ///
    /// Returns as soon as the exchange is recorded; the translation resolves
    /// later through [`Session::next_completion`] or [`Session::drain_ready`].
    pub fn submit(&mut self, text: impl Into<String>) -> Result<ExchangeId, SessionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SessionError::Validation);
        }

        let id = ExchangeId(self.next_id);
        self.next_id += 1;

        let exchange = Exchange::new(id, text, self.source_language, self.target_language);
        self.dispatch(&exchange);
        self.exchanges.push(exchange);
        self.draft_text.clear();

        info!(
            "Submitted exchange {} ({} -> {})",
            id, self.source_language, self.target_language
        );
        Ok(id)
    }

    /// Submit whatever is in the draft buffer
    pub fn submit_draft(&mut self) -> Result<ExchangeId, SessionError> {
        let draft = self.draft_text.clone();
        self.submit(draft)
    }

    /// Apply a translator result to the matching pending exchange.
    ///
    /// Returns `false` without touching anything when no pending exchange has
    /// that id, which covers duplicate and late results.
    pub fn on_translation_result(&mut self, id: ExchangeId, outcome: TranslationOutcome) -> bool {
        let Some(idx) = self.position(id) else {
            warn!("Ignoring result for unknown exchange {}", id);
            return false;
        };

        let exchange = &mut self.exchanges[idx];
        if !exchange.is_pending() {
            warn!(
                "Ignoring result for exchange {} which is already {}",
                id,
                exchange.status()
            );
            return false;
        }

        match outcome {
            Ok(translation) => {
                debug!("Exchange {} complete", id);
                exchange.complete(translation);
            }
            Err(failure) => {
                warn!("Exchange {} failed: {}", id, failure);
                exchange.fail();
            }
        }
        true
    }

    /// Overwrite the translation of a completed exchange
    pub fn edit_translation(
        &mut self,
        id: ExchangeId,
        new_text: impl Into<String>,
    ) -> Result<(), SessionError> {
        let idx = self.position(id).ok_or(SessionError::NotFound(id))?;
        let exchange = &mut self.exchanges[idx];

        if exchange.status() != ExchangeStatus::Complete {
            return Err(SessionError::InvalidState {
                id,
                status: exchange.status(),
                operation: "edit",
            });
        }

        exchange.replace_translation(new_text.into());
        debug!("Edited translation of exchange {}", id);
        Ok(())
    }

    /// Send a failed exchange back to the translator with its original text
    /// and language pair
    pub fn retry(&mut self, id: ExchangeId) -> Result<(), SessionError> {
        let idx = self.position(id).ok_or(SessionError::NotFound(id))?;

        let status = self.exchanges[idx].status();
        if status != ExchangeStatus::Failed {
            return Err(SessionError::InvalidState {
                id,
                status,
                operation: "retry",
            });
        }

        self.exchanges[idx].restart();
        self.dispatch(&self.exchanges[idx]);

        info!(
            "Retrying exchange {} (attempt {})",
            id,
            self.exchanges[idx].attempts()
        );
        Ok(())
    }

    /// Select the source language for future submissions
    pub fn set_source_language(&mut self, code: &str) -> Result<Language, SessionError> {
        let language: Language = code.parse()?;
        self.source_language = language;
        Ok(language)
    }

    /// Select the target language for future submissions
    pub fn set_target_language(&mut self, code: &str) -> Result<Language, SessionError> {
        let language: Language = code.parse()?;
        if language.is_auto() {
            return Err(SessionError::AutoTarget);
        }
        self.target_language = language;
        Ok(language)
    }

    /// Wait for the next translator result and apply it.
    ///
    /// Returns the id of the exchange that changed, or `None` once nothing is
    /// pending.
    pub async fn next_completion(&mut self) -> Option<ExchangeId> {
        while self.has_pending() {
            let completion = self.completions_rx.recv().await?;
            if let Some(id) = self.apply_completion(completion) {
                return Some(id);
            }
        }
        None
    }

    /// Apply every result that has already arrived, without waiting
    pub fn drain_ready(&mut self) -> Vec<ExchangeId> {
        let mut changed = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            if let Some(id) = self.apply_completion(completion) {
                changed.push(id);
            }
        }
        changed
    }

    /// Wait until no exchange is pending
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    fn apply_completion(&mut self, completion: Completion) -> Option<ExchangeId> {
        let Completion { id, attempt, outcome } = completion;

        if let Some(exchange) = self.get(id) {
            if exchange.attempts() != attempt {
                warn!(
                    "Ignoring stale result for exchange {} (attempt {}, current {})",
                    id,
                    attempt,
                    exchange.attempts()
                );
                return None;
            }
        }

        self.on_translation_result(id, outcome).then_some(id)
    }

    fn dispatch(&self, exchange: &Exchange) {
        let translator = Arc::clone(&self.translator);
        let tx = self.completions_tx.clone();
        let id = exchange.id();
        let attempt = exchange.attempts();
        let text = exchange.source_text().to_string();
        let source = exchange.source_language();
        let target = exchange.target_language();

        self.runtime.spawn(async move {
            let outcome = translator.translate(&text, source, target).await;
            if tx.send(Completion { id, attempt, outcome }).is_err() {
                debug!("Session closed before exchange {} resolved", id);
            }
        });
    }

    fn position(&self, id: ExchangeId) -> Option<usize> {
        self.exchanges.binary_search_by_key(&id, Exchange::id).ok()
    }
}
