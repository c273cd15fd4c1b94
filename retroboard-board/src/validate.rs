//! Structural invariants every committed board must satisfy

use crate::error::{BoardError, Result};
use crate::types::{Board, Item};
use std::collections::HashSet;

/// Check that a board is well formed.
///
/// - column ids are unique
/// - item ids, including cards inside stacks, are unique board-wide and do
///   not collide with column ids
/// - every stack holds at least two cards
pub fn validate(board: &Board) -> Result<()> {
    let mut seen = HashSet::new();

    for column in board.columns() {
        if !seen.insert(column.id.as_str()) {
            return Err(BoardError::duplicate_id("column", column.id.as_str()));
        }
    }

    for column in board.columns() {
        for item in &column.items {
            if !seen.insert(item.id().as_str()) {
                return Err(BoardError::duplicate_id(item.kind().as_str(), item.id().as_str()));
            }
            if let Item::Stack(stack) = item {
                if stack.len() < 2 {
                    return Err(BoardError::InvalidStack {
                        id: stack.id.to_string(),
                        count: stack.len(),
                    });
                }
                for card in stack.cards() {
                    if !seen.insert(card.id.as_str()) {
                        return Err(BoardError::duplicate_id("card", card.id.as_str()));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Every id on the board, stacked cards included, in board order
pub fn all_ids(board: &Board) -> Vec<String> {
    let mut ids = Vec::new();
    for column in board.columns() {
        for item in &column.items {
            ids.push(item.id().to_string());
            if let Item::Stack(stack) = item {
                ids.extend(stack.cards().iter().map(|c| c.id.to_string()));
            }
        }
    }
    ids
}
