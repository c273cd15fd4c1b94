//! Live preview while an item hovers over another column

use super::{insert_before, take_item};
use crate::locate::{column_index_containing, locate_item};
use crate::types::EntityId;
use crate::types::Board;
use tracing::trace;

/// Compute the provisional board for `active` hovering `over`.
///
/// Only cross-column hovers change anything: the active item leaves its
/// column and is inserted before `over` (or appended when `over` is the
/// destination column itself or not one of its items). Same-column hovers
/// and dragged columns return `None`; they only reorder on drop.
pub fn preview_move(board: &Board, active: &str, over: &str) -> Option<Board> {
    let (source, index) = locate_item(board, active)?;
    let target = column_index_containing(board, over)?;
    if source == target {
        return None;
    }

    let mut next = board.clone();
    let item = take_item(&mut next, source, index)?;
    let at = insert_before(&mut next, target, over, item)?;
    trace!(active, over, from = source, to = target, at, "preview move");
    Some(next)
}

/// Put a previewed item back where it started, keeping every other change.
///
/// `origin` is the column id and index the item had when the drag began.
/// Returns `None` when the item is already in its origin column or either
/// is gone.
pub(crate) fn undo_preview(board: &Board, active: &str, origin: &(EntityId, usize)) -> Option<Board> {
    let (column_id, index) = origin;
    let (current, at) = locate_item(board, active)?;
    let home = board.column_index(column_id.as_str())?;
    if current == home {
        return None;
    }

    let mut next = board.clone();
    let item = take_item(&mut next, current, at)?;
    let col = next.column_mut(home)?;
    let index = (*index).min(col.items.len());
    col.items.insert(index, item);
    Some(next)
}
