//! Command-line interface for strictly_remote.

use clap::{Parser, Subcommand};

/// Strictly Remote - play tic-tac-toe against a remote opponent service
#[derive(Parser, Debug)]
#[command(name = "strictly_remote")]
#[command(about = "Terminal client for a remote tic-tac-toe opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the client configuration file
    #[arg(short, long, global = true, default_value = "strictly_remote.toml")]
    pub config: std::path::PathBuf,

    /// Opponent service URL (overrides config and environment)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Let the computer make the opening move
        #[arg(long)]
        computer_first: bool,
    },

    /// Print the authoritative game state
    State,

    /// Restart the remote game
    Restart,
}
