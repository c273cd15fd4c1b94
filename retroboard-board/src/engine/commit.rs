//! Final board mutation applied when an item is dropped

use super::{array_move, insert_before, take_item};
use crate::locate::{column_index_containing, locate_item, resolve, Resolved};
use crate::types::{Board, EntityId, Item, Stack};
use tracing::{debug, warn};

/// How the drop should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIntent {
    /// Reorder or move between columns
    Reorder,
    /// Merge the dragged card into the target card or stack
    Stack,
}

/// What a successful commit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committed {
    /// The top-level column sequence changed
    ColumnsReordered { from: usize, to: usize },
    /// An item moved within its column
    Reordered { column: EntityId, from: usize, to: usize },
    /// An item moved to another column
    Moved { from: EntityId, to: EntityId, index: usize },
    /// Two cards became a new stack
    Stacked { stack: EntityId },
    /// A card joined an existing stack
    AddedToStack { stack: EntityId },
}

/// Apply a drop of `active` onto `over`.
///
/// Returns `None` when the drop changes nothing: dropping onto itself,
/// unknown ids, an index that would not move, or a stacking drop whose
/// operands are not eligible. The input board is never modified.
pub fn commit_drop(
    board: &Board,
    active: &str,
    over: &str,
    intent: DropIntent,
) -> Option<(Board, Committed)> {
    if active == over {
        return None;
    }

    match resolve(board, active)? {
        Resolved::Column(_) => reorder_columns(board, active, over),
        Resolved::Item(_) => match intent {
            DropIntent::Stack => stack_onto(board, active, over),
            DropIntent::Reorder => reorder_item(board, active, over),
        },
    }
}

fn reorder_columns(board: &Board, active: &str, over: &str) -> Option<(Board, Committed)> {
    let from = board.column_index(active)?;
    // An item under the pointer stands in for its column.
    let to = column_index_containing(board, over)?;

    let mut next = board.clone();
    if !next.move_column(from, to) {
        return None;
    }
    debug!(column = active, from, to, "columns reordered");
    Some((next, Committed::ColumnsReordered { from, to }))
}

fn reorder_item(board: &Board, active: &str, over: &str) -> Option<(Board, Committed)> {
    let (source, index) = locate_item(board, active)?;
    let target = column_index_containing(board, over)?;
    let mut next = board.clone();

    if source != target {
        let item = take_item(&mut next, source, index)?;
        let at = insert_before(&mut next, target, over, item)?;
        let from = board.column_at(source)?.id.clone();
        let to = board.column_at(target)?.id.clone();
        debug!(item = active, %from, %to, at, "item moved across columns");
        return Some((next, Committed::Moved { from, to, index: at }));
    }

    let column = next.column_mut(source)?;
    // Dropping onto the column background sends the item to the end.
    let to = column
        .position(over)
        .unwrap_or(column.items.len().saturating_sub(1));
    if !array_move(&mut column.items, index, to) {
        return None;
    }
    let column = column.id.clone();
    debug!(item = active, %column, from = index, to, "item reordered");
    Some((
        next,
        Committed::Reordered {
            column,
            from: index,
            to,
        },
    ))
}

fn stack_onto(board: &Board, active: &str, over: &str) -> Option<(Board, Committed)> {
    let eligible = matches!(resolve(board, active), Some(Resolved::Item(Item::Card(_))))
        && resolve(board, over)
            .and_then(|r| r.item())
            .is_some_and(Item::accepts_stacking);
    if !eligible {
        warn!(active, over, "rejected stacking drop on ineligible items");
        return None;
    }

    let (source, index) = locate_item(board, active)?;
    let mut next = board.clone();
    let Some(Item::Card(card)) = take_item(&mut next, source, index) else {
        return None;
    };

    let (target_col, target_index) = locate_item(&next, over)?;
    let column = next.column_mut(target_col)?;
    let slot = column.items.get_mut(target_index)?;

    let committed = match slot {
        Item::Card(target) => {
            let stack = Stack::new(EntityId::new(), target.clone(), card);
            let id = stack.id.clone();
            *slot = Item::Stack(stack);
            debug!(active, over, stack = %id, "cards stacked");
            Committed::Stacked { stack: id }
        }
        Item::Stack(stack) => {
            stack.push(card);
            debug!(active, stack = %stack.id, size = stack.len(), "card added to stack");
            Committed::AddedToStack {
                stack: stack.id.clone(),
            }
        }
        Item::Spacer(_) => return None,
    };
    Some((next, committed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, Column};

    fn ids(board: &Board, column: usize) -> Vec<String> {
        board
            .column_at(column)
            .unwrap()
            .items
            .iter()
            .map(|i| i.id().to_string())
            .collect()
    }

    fn two_cards() -> Board {
        Board::new([Column::new("todo", "To Do")
            .with_item(Card::new("c1", "A", "first"))
            .with_item(Card::new("c2", "B", "second"))])
    }

    #[test]
    fn test_same_column_reorder() {
        let (next, committed) =
            commit_drop(&two_cards(), "c1", "c2", DropIntent::Reorder).unwrap();
        assert_eq!(ids(&next, 0), ["c2", "c1"]);
        assert!(matches!(committed, Committed::Reordered { from: 0, to: 1, .. }));
    }

    #[test]
    fn test_drop_onto_self_is_noop() {
        assert!(commit_drop(&two_cards(), "c1", "c1", DropIntent::Reorder).is_none());
        assert!(commit_drop(&two_cards(), "c1", "c1", DropIntent::Stack).is_none());
    }

    #[test]
    fn test_drop_onto_own_column_moves_to_end() {
        let board = Board::sample();
        let (next, _) = commit_drop(&board, "card1", "col1", DropIntent::Reorder).unwrap();
        assert_eq!(ids(&next, 0), ["spacer1", "card2", "card1"]);
    }

    #[test]
    fn test_drop_onto_own_column_when_already_last() {
        let board = Board::sample();
        assert!(commit_drop(&board, "card2", "col1", DropIntent::Reorder).is_none());
        assert!(commit_drop(&board, "card8", "col3", DropIntent::Reorder).is_none());
    }

    #[test]
    fn test_cross_column_drop_inserts_before_target() {
        let board = Board::sample();
        let (next, committed) =
            commit_drop(&board, "card3", "card6", DropIntent::Reorder).unwrap();
        assert_eq!(ids(&next, 1), ["card4", "spacer2", "card5"]);
        assert_eq!(ids(&next, 2)[..2], ["card3", "card6"]);
        assert_eq!(
            committed,
            Committed::Moved {
                from: "col2".into(),
                to: "col3".into(),
                index: 0
            }
        );
    }

    #[test]
    fn test_column_drop_onto_column() {
        let board = Board::sample();
        let (next, committed) = commit_drop(&board, "col3", "col1", DropIntent::Reorder).unwrap();
        let order: Vec<_> = next.columns().map(|c| c.id.to_string()).collect();
        assert_eq!(order, ["col3", "col1", "col2"]);
        assert_eq!(committed, Committed::ColumnsReordered { from: 2, to: 0 });
    }

    #[test]
    fn test_column_drop_onto_item_uses_its_column() {
        let board = Board::sample();
        let (next, _) = commit_drop(&board, "col1", "card7", DropIntent::Reorder).unwrap();
        let order: Vec<_> = next.columns().map(|c| c.id.to_string()).collect();
        assert_eq!(order, ["col2", "col3", "col1"]);
    }

    #[test]
    fn test_stack_two_cards() {
        let (next, committed) = commit_drop(&two_cards(), "c1", "c2", DropIntent::Stack).unwrap();
        let column = next.column_at(0).unwrap();
        assert_eq!(column.items.len(), 1);
        let stack = column.items[0].as_stack().unwrap();
        let order: Vec<_> = stack.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["c2", "c1"]);
        assert_eq!(committed, Committed::Stacked { stack: stack.id.clone() });
    }

    #[test]
    fn test_stack_across_columns_appends_to_existing_stack() {
        let board = Board::sample();
        let (board, _) = commit_drop(&board, "card3", "card4", DropIntent::Stack).unwrap();
        let stack_id = board.column_at(1).unwrap().items[0].id().clone();

        let (next, committed) =
            commit_drop(&board, "card1", stack_id.as_str(), DropIntent::Stack).unwrap();
        assert_eq!(committed, Committed::AddedToStack { stack: stack_id });
        assert_eq!(ids(&next, 0), ["spacer1", "card2"]);
        let stack = next.column_at(1).unwrap().items[0].as_stack().unwrap();
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.cards()[2].id, "card1");
    }

    #[test]
    fn test_stacking_a_spacer_is_rejected() {
        let board = Board::sample();
        assert!(commit_drop(&board, "spacer1", "card2", DropIntent::Stack).is_none());
        assert!(commit_drop(&board, "card1", "spacer1", DropIntent::Stack).is_none());
    }
}
