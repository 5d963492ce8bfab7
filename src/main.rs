//! Main entry point for the Translation Portal CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use translation_portal::cli::commands::{self, Commands};

/// Translation Portal - interactive translation client and service
#[derive(Parser, Debug)]
#[command(name = "translation-portal", version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}={},tower_http={}", "translation_portal", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Execute command
    match args.command {
        Some(Commands::Server { host, port }) => {
            commands::handle_server(host, port).await?;
        }
        Some(Commands::Translate { text, from, to, url }) => {
            commands::handle_translate(text, from, to, url).await?;
        }
        Some(Commands::Chat { from, to, url }) => {
            commands::handle_chat(from, to, url).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
