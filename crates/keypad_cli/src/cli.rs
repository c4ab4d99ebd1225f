//! Command-line interface for the keypad engine.

use clap::{Parser, Subcommand};

/// Keypad tic-tac-toe - play, analyse and check saved games
#[derive(Parser, Debug)]
#[command(name = "keypad")]
#[command(about = "Keypad tic-tac-toe engine driver", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal (enter keypad digits 1-9)
    Play {
        /// Let the advisor play O
        #[arg(long)]
        advisor_plays_o: bool,

        /// Cell size used when reporting the win-line stroke
        #[arg(long, default_value = "100")]
        cell_size: f64,
    },

    /// Show the advisor's view of a board
    Advise {
        /// Nine cells, top row first: X, O, and . for empty (e.g. "X..|.X.|...")
        board: String,
    },

    /// Replay a sequence of moves and report the outcome
    Replay {
        /// Keypad digits, optionally separated by commas (e.g. "7,1,5,2,3")
        moves: String,

        /// Print the exported state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a saved state file
    Check {
        /// Path to a JSON state record
        file: std::path::PathBuf,
    },
}
