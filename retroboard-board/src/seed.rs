//! Loading seed boards from YAML or JSON files

use crate::error::{BoardError, Result};
use crate::types::Board;
use crate::validate::validate;
use std::path::Path;
use tracing::debug;

/// Read a board from `path`, choosing the format by extension
/// (`.yaml`/`.yml` or `.json`), and check its invariants.
pub fn load_board(path: impl AsRef<Path>) -> Result<Board> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let board = parse_board(path, &text)?;
    validate(&board)?;
    debug!(path = %path.display(), columns = board.len(), "seed board loaded");
    Ok(board)
}

fn parse_board(path: &Path, text: &str) -> Result<Board> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => Ok(serde_yaml_ng::from_str(text)?),
        Some("json") => Ok(serde_json::from_str(text)?),
        _ => Err(BoardError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
