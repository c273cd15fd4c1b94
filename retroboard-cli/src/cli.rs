//! CLI definition for the retroboard command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Retroboard - replay drag gestures against a retrospective board.
///
/// Boards and scripts are YAML (`.yaml`, `.yml`) or JSON (`.json`). Scripts
/// run on a virtual clock, so `wait` steps finish instantly.
#[derive(Parser, Debug)]
#[command(name = "retroboard")]
#[command(version)]
#[command(about = "Replay drag gestures against a retrospective board")]
#[command(
    long_about = "Loads a seed board, replays a scripted sequence of drag gestures and \
    stack commands against it on a virtual clock, and prints the resulting board.\n\n\
    Environment variables:\n  \
    RETROBOARD_STACK_DELAY_MS      Hover time before stacking arms (default 600)\n  \
    RETROBOARD_FRAME_INTERVAL_MS   Preview frame interval (default 16)\n  \
    RETROBOARD_THROTTLE_PREVIEWS   Coalesce previews to one per frame (default true)\n  \
    RETROBOARD_DROP_OUTSIDE        revert | keep (default revert)"
)]
pub struct Cli {
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with_all = ["debug", "verbose"])]
    pub quiet: bool,

    /// Log session transitions to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Log every preview and timer to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a gesture script against a seed board and print the result
    Replay {
        /// Seed board file
        seed: PathBuf,
        /// Script of gestures and commands
        script: PathBuf,
        /// Board configuration file (TOML, YAML or JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Output format for the final board
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Check that a seed board loads and satisfies the board invariants
    Check {
        /// Seed board file
        seed: PathBuf,
    },
}

/// How the final board is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}
