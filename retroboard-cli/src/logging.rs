//! Logging setup for the binary

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Pick the log level from the global flags; `RUST_LOG` wins when set.
pub fn log_level(quiet: bool, debug: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install the stderr subscriber. Stdout is reserved for the board output.
pub fn configure_logging(quiet: bool, debug: bool, verbose: bool) {
    let level = log_level(quiet, debug, verbose);
    let filter = if debug || verbose {
        EnvFilter::new(format!("retroboard_board={level},retroboard_cli={level},warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
    };

    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init();
}
