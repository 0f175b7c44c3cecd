//! Command-line front end for the league simulation.
//!
//! ```bash
//! # Generated four-club league, one season
//! ballpark season --teams 4 --seed 2024
//!
//! # League from data files
//! ballpark season --data ./data
//!
//! # One exhibition called pitch by pitch, then verify its journal
//! BALLPARK_SAVE_DIR=./saves BALLPARK_SESSION_ID=demo ballpark game
//! ballpark replay demo --save-dir ./saves
//! ```

mod commands;
mod report;

use anyhow::Result;
use clap::Parser;
use commands::{GameCmd, ReplayCmd, SeasonCmd};

/// Deterministic pitch-by-pitch baseball league
#[derive(Parser)]
#[command(name = "ballpark")]
#[command(about = "Simulate baseball leagues pitch by pitch", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Simulate a full regular season
    Season(SeasonCmd),

    /// Play one exhibition with the automatic manager
    Game(GameCmd),

    /// Verify a saved session journal
    Replay(ReplayCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for BALLPARK_* variables)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Season(cmd) => cmd.execute().await,
        Command::Game(cmd) => cmd.execute().await,
        Command::Replay(cmd) => cmd.execute(),
    }
}
