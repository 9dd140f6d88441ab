//! Strictly Remote - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_remote::{ClientConfig, HttpSyncClient, SyncClient};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::load_or_default(&cli.config)?.with_overrides(cli.server_url);

    match cli.command {
        Command::Play { computer_first } => {
            strictly_remote::tui::run_tui(config, computer_first).await
        }
        Command::State => {
            initialize_tracing();
            print_state(&config).await
        }
        Command::Restart => {
            initialize_tracing();
            restart(&config).await
        }
    }
}

/// Fetch and print the authoritative snapshot
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn print_state(config: &ClientConfig) -> Result<()> {
    let client = HttpSyncClient::new(config.server_url(), config.request_timeout())?;
    let snapshot = client.fetch_snapshot().await?;
    let session = config.session();

    println!("{}", snapshot.board.display());
    match snapshot.status.outcome(&session) {
        Some(outcome) => println!("Game over: {}", outcome.human_message()),
        None => println!(
            "In progress, {} to move",
            session.role_of(snapshot.implied_turn(&session))
        ),
    }
    Ok(())
}

/// Restart the remote game
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn restart(config: &ClientConfig) -> Result<()> {
    let client = HttpSyncClient::new(config.server_url(), config.request_timeout())?;
    let ack = client.request_restart().await?;
    info!(status = %ack.status, "Restart acknowledged");
    println!("Restarted ({})", ack.status);
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,strictly_remote=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
