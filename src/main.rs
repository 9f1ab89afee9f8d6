//! Riftline CLI - play, simulate, and inspect dual-world survival sessions.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Riftline - a deterministic dual-world survival game
#[derive(Parser, Debug)]
#[command(name = "riftline")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an interactive session
    Play {
        /// Random seed (default: derived from the clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Zone pairs to generate (minimum 15)
        #[arg(short, long, default_value = "15")]
        zones: usize,

        /// Hall of fame file to load and persist (JSON)
        #[arg(short, long)]
        records: Option<std::path::PathBuf>,
    },

    /// Run mass autoplayed sessions and aggregate statistics
    Sim {
        /// Number of sessions to run
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each session; default: clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Players per session (1-4)
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Zone pairs per map (minimum 15)
        #[arg(short, long, default_value = "15")]
        zones: usize,

        /// Round cap per session
        #[arg(short, long, default_value = "200")]
        max_rounds: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Print a persisted hall of fame file
    Records {
        /// Hall of fame file (JSON)
        #[arg(required = true)]
        path: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            seed,
            zones,
            records,
        } => cli::play::execute(seed, zones, records.as_deref()),

        Commands::Sim {
            games,
            seed,
            players,
            zones,
            max_rounds,
            format,
            progress,
        } => cli::sim::execute(games, seed, players, zones, max_rounds, format, progress),

        Commands::Records { path } => cli::records::execute(&path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
