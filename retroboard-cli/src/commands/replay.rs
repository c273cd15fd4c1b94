//! `retroboard replay` - run a script against a seed board

use std::path::Path;

use anyhow::{Context, Result};
use retroboard_board::seed::load_board;
use retroboard_board::{Board, BoardConfig, BoardSession};
use tracing::info;

use crate::cli::OutputFormat;
use crate::script::{load_script, run};

/// Replay `script` on `seed` and render the final board
pub fn replay(
    seed: &Path,
    script: &Path,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<String> {
    let config = match config {
        Some(path) => BoardConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BoardConfig::load().context("failed to load config from the environment")?,
    };
    let board = load_board(seed).with_context(|| format!("failed to load seed {}", seed.display()))?;
    let steps = load_script(script)?;

    let mut session = BoardSession::virtual_time(board, config)?;
    let outcomes = run(&mut session, &steps)?;
    let committed = outcomes.iter().filter(|o| o.is_committed()).count();
    info!(steps = steps.len(), drops = outcomes.len(), committed, "replay finished");

    render(&session.into_board(), format)
}

/// Serialize a board in the requested format
pub fn render(board: &Board, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(board)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(board)?,
    };
    Ok(text)
}
