//! inarow - unified CLI
//!
//! Runs the room server or queries a running one.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use inarow_server::{DirectoryClient, ServerConfig};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Rooms { server_url } => list_rooms(server_url).await,
    }
}

/// Run the room server
#[instrument(skip_all)]
async fn run_server(config: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = ServerConfig::load(config.as_deref())?.with_overrides(host, port);
    info!(
        address = %config.bind_address(),
        grace_ms = config.reconnect_grace_ms(),
        start_timeout_secs = ?config.start_timeout_secs(),
        "Starting inarow server"
    );
    inarow_server::serve(config).await
}

/// Print the directory of a running server
#[instrument]
async fn list_rooms(server_url: String) -> Result<()> {
    let rooms = DirectoryClient::new(server_url).rooms().await?;
    if rooms.is_empty() {
        println!("No rooms.");
        return Ok(());
    }
    for room in rooms {
        println!("{:<24} {}/{}", room.name(), room.players(), room.max_players());
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inarow_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
