//! Interactive translation session on stdin/stdout

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::cli::render;
use crate::session::{ExchangeId, Session};

const HELP: &str = "\
Type text and press Enter to translate it.
  /from <code>        set the source language
  /to <code>          set the target language
  /edit <id> <text>   replace a finished translation
  /retry <id>         resend a failed translation
  /list               show the whole history
  /langs              list language codes
  /help               show this help
  /quit               leave";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Submit(String),
    From(String),
    To(String),
    Edit(ExchangeId, String),
    Retry(ExchangeId),
    List,
    Langs,
    Help,
    Quit,
    Empty,
}

/// Parse a line typed at the prompt
pub fn parse_input(line: &str) -> Result<ChatInput, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ChatInput::Empty);
    }

    let Some(command) = trimmed.strip_prefix('/') else {
        return Ok(ChatInput::Submit(line.to_string()));
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    let parse_id = |raw: &str| {
        raw.parse::<ExchangeId>()
            .map_err(|_| format!("'{}' is not an exchange id", raw))
    };

    match name {
        "from" | "to" if rest.is_empty() => Err(format!("usage: /{} <code>", name)),
        "from" => Ok(ChatInput::From(rest.to_string())),
        "to" => Ok(ChatInput::To(rest.to_string())),
        "edit" => {
            let (id, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: /edit <id> <text>".to_string())?;
            Ok(ChatInput::Edit(parse_id(id)?, text.trim_start().to_string()))
        }
        "retry" if rest.is_empty() => Err("usage: /retry <id>".to_string()),
        "retry" => Ok(ChatInput::Retry(parse_id(rest)?)),
        "list" => Ok(ChatInput::List),
        "langs" => Ok(ChatInput::Langs),
        "help" => Ok(ChatInput::Help),
        "quit" | "exit" => Ok(ChatInput::Quit),
        other => Err(format!("unknown command /{} (try /help)", other)),
    }
}

/// Run the interactive loop until `/quit` or end of input
pub async fn run(mut session: Session) -> anyhow::Result<()> {
    println!("Translation session ({})", render::render_language_pair(&session));
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    flush_pending(&mut session).await;
                    break;
                };
                let input = match parse_input(&line) {
                    Ok(input) => input,
                    Err(message) => {
                        eprintln!("⚠️  {}", message);
                        continue;
                    }
                };
                if !handle_input(&mut session, input) {
                    break;
                }
            }
            Some(id) = session.next_completion(), if session.has_pending() => {
                if let Some(exchange) = session.get(id) {
                    println!("{}", render::render_exchange(exchange));
                }
            }
        }
    }

    let pending = session.pending_count();
    if pending > 0 {
        debug!("Leaving with {} translations still pending", pending);
    }
    Ok(())
}

/// Wait for every outstanding translation and print each as it lands.
/// Piped input ends before the results arrive; this keeps them from being lost.
async fn flush_pending(session: &mut Session) -> Vec<ExchangeId> {
    let mut finished = Vec::new();
    while let Some(id) = session.next_completion().await {
        if let Some(exchange) = session.get(id) {
            println!("{}", render::render_exchange(exchange));
        }
        finished.push(id);
    }
    finished
}

/// Apply one input to the session. Returns `false` when the user quits.
fn handle_input(session: &mut Session, input: ChatInput) -> bool {
    let result = match input {
        ChatInput::Empty => Ok(()),
        ChatInput::Quit => return false,
        ChatInput::Help => {
            println!("{}", HELP);
            Ok(())
        }
        ChatInput::Langs => {
            println!("{}", render::render_languages());
            Ok(())
        }
        ChatInput::List => {
            println!("{}", render::render_history(session));
            Ok(())
        }
        ChatInput::Submit(text) => session.submit(text).map(|id| {
            if let Some(exchange) = session.get(id) {
                println!("{}", render::render_exchange(exchange));
            }
        }),
        ChatInput::From(code) => session.set_source_language(&code).map(|_| {
            println!("Now translating {}", render::render_language_pair(session));
        }),
        ChatInput::To(code) => session.set_target_language(&code).map(|_| {
            println!("Now translating {}", render::render_language_pair(session));
        }),
        ChatInput::Edit(id, text) => session.edit_translation(id, text).map(|_| {
            if let Some(exchange) = session.get(id) {
                println!("{}", render::render_exchange(exchange));
            }
        }),
        ChatInput::Retry(id) => session.retry(id).map(|_| println!("Retrying {}", id)),
    };

    if let Err(e) = result {
        eprintln!("⚠️  {}", e);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::Translator;
    use crate::core::language::Language;
    use crate::core::models::TranslationOutcome;
    use crate::session::ExchangeStatus;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct SlowReverse;

    #[async_trait]
    impl Translator for SlowReverse {
        async fn translate(&self, text: &str, _source: Language, _target: Language) -> TranslationOutcome {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(text.chars().rev().collect())
        }
    }

    #[test]
    fn test_plain_text_is_submitted_verbatim() {
        assert_eq!(
            parse_input("  Guten Tag ").unwrap(),
            ChatInput::Submit("  Guten Tag ".to_string())
        );
        assert_eq!(parse_input("   ").unwrap(), ChatInput::Empty);
    }

    #[test]
    fn test_language_commands() {
        assert_eq!(parse_input("/from en").unwrap(), ChatInput::From("en".to_string()));
        assert_eq!(parse_input("/to  ja ").unwrap(), ChatInput::To("ja".to_string()));
        assert!(parse_input("/to").is_err());
    }

    #[test]
    fn test_edit_and_retry_commands() {
        assert_eq!(
            parse_input("/edit #2 Hallo Welt").unwrap(),
            ChatInput::Edit(ExchangeId(2), "Hallo Welt".to_string())
        );
        assert_eq!(parse_input("/retry 3").unwrap(), ChatInput::Retry(ExchangeId(3)));
        assert!(parse_input("/edit 2").is_err());
        assert!(parse_input("/retry x").is_err());
    }

    #[test]
    fn test_misc_commands() {
        assert_eq!(parse_input("/list").unwrap(), ChatInput::List);
        assert_eq!(parse_input("/langs").unwrap(), ChatInput::Langs);
        assert_eq!(parse_input("/quit").unwrap(), ChatInput::Quit);
        assert!(parse_input("/dance").is_err());
    }

    #[tokio::test]
    async fn test_flush_pending_waits_for_all_translations() {
        let mut session = Session::new(Arc::new(SlowReverse)).unwrap();
        let first = session.submit("abc").unwrap();
        let second = session.submit("xyz").unwrap();
        assert_eq!(session.pending_count(), 2);

        let mut finished = flush_pending(&mut session).await;
        finished.sort();

        assert_eq!(finished, vec![first, second]);
        assert!(!session.has_pending());
        assert_eq!(session.get(first).unwrap().status(), ExchangeStatus::Complete);
        assert_eq!(session.get(second).unwrap().translated_text(), Some("zyx"));
    }

    #[tokio::test]
    async fn test_flush_pending_without_outstanding_work() {
        let mut session = Session::new(Arc::new(SlowReverse)).unwrap();
        assert!(flush_pending(&mut session).await.is_empty());
    }
}
