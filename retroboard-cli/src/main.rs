//! Retroboard CLI
//!
//! Commands:
//! - `retroboard replay <seed> <script>`: Replay a gesture script and print the board
//! - `retroboard check <seed>`: Validate a seed board
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;

use retroboard_cli::commands::{check, replay};
use retroboard_cli::logging::configure_logging;
use retroboard_cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.quiet, cli.debug, cli.verbose);

    let result = match cli.command {
        Commands::Replay {
            seed,
            script,
            config,
            format,
        } => replay::replay(&seed, &script, config.as_deref(), format),
        Commands::Check { seed } => check::check(&seed),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
