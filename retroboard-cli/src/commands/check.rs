//! `retroboard check` - validate a seed board

use std::path::Path;

use anyhow::{Context, Result};
use retroboard_board::seed::load_board;
use retroboard_board::{all_ids, Item};

/// Load and validate a seed board; returns a one-line summary
pub fn check(seed: &Path) -> Result<String> {
    let board = load_board(seed).with_context(|| format!("invalid seed {}", seed.display()))?;
    let stacks = board
        .columns()
        .flat_map(|column| column.items.iter())
        .filter(|item| matches!(item, Item::Stack(_)))
        .count();
    Ok(format!(
        "{}: ok ({} columns, {} items, {} stacks)",
        seed.display(),
        board.len(),
        all_ids(&board).len(),
        stacks
    ))
}
