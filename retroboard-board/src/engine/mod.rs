//! Reorder/move engine: pure transitions from one board to the next.
//!
//! Every function here takes a board by reference and returns a new board
//! (or `None` when nothing changes). The input board is never touched, so a
//! caller holding a pre-drag snapshot can always go back to it.

mod commit;
mod preview;

pub use commit::{commit_drop, Committed, DropIntent};
pub use preview::preview_move;
pub(crate) use preview::undo_preview;

use crate::types::{Board, Item};

/// Remove-then-insert array move.
///
/// Removing first shifts later indices down by one before reinsertion, so
/// moving `0 -> 1` in `[a, b]` yields `[b, a]`. Returns `false` when an index
/// is out of range or the element would not move.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() || from == to {
        return false;
    }
    let element = items.remove(from);
    items.insert(to, element);
    true
}

/// Take the item at `(column, index)` out of the board
fn take_item(board: &mut Board, column: usize, index: usize) -> Option<Item> {
    let col = board.column_mut(column)?;
    (index < col.items.len()).then(|| col.items.remove(index))
}

/// Insert an item into a column before the item `before`, or at the end
/// when `before` is not an item of that column (e.g. it is the column itself)
fn insert_before(board: &mut Board, column: usize, before: &str, item: Item) -> Option<usize> {
    let col = board.column_mut(column)?;
    let index = col.position(before).unwrap_or(col.items.len());
    col.items.insert(index, item);
    Some(index)
}
