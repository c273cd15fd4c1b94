//! Locating columns and items by id across the nested board structure.
//!
//! The shallow lookups ([`find_column_containing`], [`resolve`]) do not look
//! inside stacks: a stacked card is reachable through its stack's id only.
//! [`locate_deep`] descends into stacks and is meant for item commands.

use crate::types::{Board, Column, Item, ItemKind};

/// What an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Column(&'a Column),
    Item(&'a Item),
}

impl<'a> Resolved<'a> {
    /// The item, unless this is a column
    pub fn item(&self) -> Option<&'a Item> {
        match self {
            Self::Item(item) => Some(item),
            Self::Column(_) => None,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }

    /// Kind of the item, `None` for columns
    pub fn item_kind(&self) -> Option<ItemKind> {
        self.item().map(Item::kind)
    }
}

/// Position of an item in the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Column index
    pub column: usize,
    /// Index in the column's items
    pub item: usize,
    /// Index inside the stack at `item`, when the id names a stacked card
    pub slot: Option<usize>,
}

/// The column whose id is `id`, or whose top-level items contain `id`
pub fn find_column_containing<'a>(board: &'a Board, id: &str) -> Option<&'a Column> {
    column_index_containing(board, id).and_then(|index| board.column_at(index))
}

/// Index of the column returned by [`find_column_containing`]
pub fn column_index_containing(board: &Board, id: &str) -> Option<usize> {
    board
        .columns()
        .position(|col| col.id == *id || col.position(id).is_some())
}

/// Classify an id: a column first, otherwise a top-level item
pub fn resolve<'a>(board: &'a Board, id: &str) -> Option<Resolved<'a>> {
    if let Some(column) = board.find_column(id) {
        return Some(Resolved::Column(column));
    }
    board
        .columns()
        .find_map(|col| col.items.iter().find(|item| item.id() == id))
        .map(Resolved::Item)
}

/// Column and item index of a top-level item
pub fn locate_item(board: &Board, id: &str) -> Option<(usize, usize)> {
    board
        .columns()
        .enumerate()
        .find_map(|(ci, col)| col.position(id).map(|ii| (ci, ii)))
}

/// Like [`locate_item`], but also finds cards inside stacks
pub fn locate_deep(board: &Board, id: &str) -> Option<Location> {
    for (ci, col) in board.columns().enumerate() {
        for (ii, item) in col.items.iter().enumerate() {
            if item.id() == id {
                return Some(Location {
                    column: ci,
                    item: ii,
                    slot: None,
                });
            }
            if let Item::Stack(stack) = item {
                if let Some(slot) = stack.position(id) {
                    return Some(Location {
                        column: ci,
                        item: ii,
                        slot: Some(slot),
                    });
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, Stack};

    fn board_with_stack() -> Board {
        let mut board = Board::sample();
        let col = board.column_mut(0).unwrap();
        col.items.push(Item::from(Stack::new(
            "stack1",
            Card::new("inner1", "A", "x"),
            Card::new("inner2", "B", "y"),
        )));
        board
    }

    #[test]
    fn test_find_column_by_own_id_and_item() {
        let board = Board::sample();
        assert_eq!(find_column_containing(&board, "col2").unwrap().id, "col2");
        assert_eq!(find_column_containing(&board, "card5").unwrap().id, "col2");
        assert!(find_column_containing(&board, "missing").is_none());
    }

    #[test]
    fn test_shallow_lookup_skips_stacked_cards() {
        let board = board_with_stack();
        assert!(find_column_containing(&board, "inner1").is_none());
        assert!(resolve(&board, "inner1").is_none());
        assert_eq!(
            resolve(&board, "stack1").and_then(|r| r.item_kind()),
            Some(ItemKind::Stack)
        );
    }

    #[test]
    fn test_resolve_column_before_items() {
        let board = Board::sample();
        assert!(resolve(&board, "col3").unwrap().is_column());
        assert_eq!(
            resolve(&board, "spacer3").unwrap().item_kind(),
            Some(ItemKind::Spacer)
        );
    }

    #[test]
    fn test_locate_deep_finds_stacked_card() {
        let board = board_with_stack();
        let loc = locate_deep(&board, "inner2").unwrap();
        assert_eq!(loc.column, 0);
        assert_eq!(loc.item, 3);
        assert_eq!(loc.slot, Some(1));

        let loc = locate_deep(&board, "card2").unwrap();
        assert_eq!((loc.column, loc.item, loc.slot), (0, 2, None));
    }
}
