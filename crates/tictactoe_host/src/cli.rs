//! Command-line interface for the tic-tac-toe host.

use clap::{Parser, Subcommand};

/// Tic-tac-toe host - replay signed matches against the rules engine
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Replay tic-tac-toe matches against the rules engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a TOML match script and print every step
    Replay {
        /// Path to the match script
        script: std::path::PathBuf,

        /// Print step reports as JSON lines instead of boards
        #[arg(long)]
        json: bool,
    },
}
