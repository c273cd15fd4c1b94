//! Stack cycling engine and stack commands

mod cycle;
mod unstack;

pub use cycle::CycleStack;
pub use unstack::Unstack;

use crate::error::{BoardError, Result};
use crate::locate::locate_item;
use crate::types::{Board, Item, Stack};
use serde::{Deserialize, Serialize};

/// Which way to rotate a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDirection {
    /// Displayed card moves to the back
    Next,
    /// Last card comes to the front
    Prev,
}

impl CycleDirection {
    /// Display index after one rotation of a stack of `len` cards
    pub fn step(self, index: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match self {
            Self::Next => (index + 1) % len,
            Self::Prev => (index + len - 1) % len,
        }
    }
}

/// Rotate a stack by one card. Returns the new board and the stack size.
pub fn cycle(board: &Board, stack: &str, direction: CycleDirection) -> Result<(Board, usize)> {
    let (column, index) = find_stack(board, stack)?;
    let mut next = board.clone();
    let Some(Item::Stack(target)) = next
        .column_mut(column)
        .and_then(|col| col.items.get_mut(index))
    else {
        return Err(BoardError::not_found(stack));
    };
    match direction {
        CycleDirection::Next => target.rotate_next(),
        CycleDirection::Prev => target.rotate_prev(),
    }
    let len = target.len();
    Ok((next, len))
}

/// Replace a stack with its cards, in the stack's current order
pub fn unstack(board: &Board, stack: &str) -> Result<Board> {
    let (column, index) = find_stack(board, stack)?;
    let mut next = board.clone();
    let col = next
        .column_mut(column)
        .ok_or_else(|| BoardError::not_found(stack))?;
    let Item::Stack(removed) = col.items.remove(index) else {
        return Err(BoardError::wrong_kind(stack, "stack"));
    };
    let tail = col.items.split_off(index);
    col.items
        .extend(removed.into_cards().into_iter().map(Item::Card));
    col.items.extend(tail);
    Ok(next)
}

/// Column and item index of a top-level stack
fn find_stack(board: &Board, id: &str) -> Result<(usize, usize)> {
    let (column, index) = locate_item(board, id).ok_or_else(|| BoardError::not_found(id))?;
    let is_stack = board
        .column_at(column)
        .and_then(|col| col.items.get(index))
        .and_then(Item::as_stack)
        .is_some();
    if !is_stack {
        return Err(BoardError::wrong_kind(id, "stack"));
    }
    Ok((column, index))
}

/// Borrow a top-level stack by id
pub fn get_stack<'a>(board: &'a Board, id: &str) -> Result<&'a Stack> {
    let (column, index) = find_stack(board, id)?;
    board
        .column_at(column)
        .and_then(|col| col.items.get(index))
        .and_then(Item::as_stack)
        .ok_or_else(|| BoardError::not_found(id))
}
