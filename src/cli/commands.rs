//! CLI command definitions and handlers

use clap::Subcommand;
use std::sync::Arc;

use crate::core::client::HttpTranslator;
use crate::core::config::ClientConfig;
use crate::core::language::Language;
use crate::session::Session;

/// Commands for the translation portal
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the translation HTTP service
    Server {
        /// Bind address (default: HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (default: PORT or 3001)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Translate a single piece of text
    Translate {
        /// Text to translate
        text: String,

        /// Source language code
        #[arg(short, long, default_value = "auto")]
        from: String,

        /// Target language code
        #[arg(short, long, default_value = "de")]
        to: String,

        /// Translation service URL (default: TRANSLATOR_URL or http://localhost:3001)
        #[arg(long)]
        url: Option<String>,
    },

    /// Start an interactive translation session
    Chat {
        /// Source language code
        #[arg(short, long, default_value = "auto")]
        from: String,

        /// Target language code
        #[arg(short, long, default_value = "de")]
        to: String,

        /// Translation service URL (default: TRANSLATOR_URL or http://localhost:3001)
        #[arg(long)]
        url: Option<String>,
    },
}

/// Handle server command
pub async fn handle_server(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    use crate::core::config::ServiceConfig;
    use crate::server::api::run_server;
    use tracing::info;

    let mut config = ServiceConfig::from_env()?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    info!("Starting HTTP server on {}:{}", config.host, config.port);
    println!("🚀 Server starting on http://{}:{}", config.host, config.port);

    run_server(config).await
}

/// Handle one-shot translate command
pub async fn handle_translate(
    text: String,
    from: String,
    to: String,
    url: Option<String>,
) -> anyhow::Result<()> {
    use crate::session::ExchangeStatus;
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;

    let mut session = open_session(&from, &to, url)?;
    let id = session.submit(text)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!(
        "Translating ({})",
        crate::cli::render::render_language_pair(&session)
    ));
    pb.enable_steady_tick(Duration::from_millis(100));

    session.settle().await;
    pb.finish_and_clear();

    let exchange = session
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Exchange {} disappeared", id))?;

    match (exchange.status(), exchange.translated_text()) {
        (ExchangeStatus::Complete, Some(translation)) => {
            println!("{}", translation);
            Ok(())
        }
        _ => anyhow::bail!("Translation failed"),
    }
}

/// Handle interactive chat command
pub async fn handle_chat(from: String, to: String, url: Option<String>) -> anyhow::Result<()> {
    let session = open_session(&from, &to, url)?;
    crate::cli::chat::run(session).await
}

fn open_session(from: &str, to: &str, url: Option<String>) -> anyhow::Result<Session> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = url {
        config = config.with_service_url(url);
    }

    let translator = Arc::new(HttpTranslator::new(&config)?);
    let source: Language = from.parse()?;
    let target: Language = to.parse()?;

    Ok(Session::with_languages(translator, source, target)?)
}
