//! Command-line interface for inarow.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// inarow - room server for N-in-a-row games
#[derive(Parser, Debug)]
#[command(name = "inarow")]
#[command(about = "Room server for gomoku, connect-four and other N-in-a-row games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the room server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the room directory of a running server
    Rooms {
        /// Server URL
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server_url: String,
    },
}
