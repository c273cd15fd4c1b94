//! DeleteItem command

use crate::error::{BoardError, Result};
use crate::locate::locate_deep;
use crate::store::{BoardStore, Execute};
use crate::types::{EntityId, Item, Shrunk};
use serde::Deserialize;
use tracing::debug;

/// Remove a card, spacer or stack.
///
/// A card inside a stack is taken out of it; a stack left with one card is
/// replaced by that card in the same slot.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteItem {
    pub id: EntityId,
}

impl DeleteItem {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute for DeleteItem {
    /// The removed item
    type Output = Item;

    fn execute(&self, store: &mut BoardStore) -> Result<Item> {
        let id = self.id.as_str();
        let location = locate_deep(store.board(), id).ok_or_else(|| BoardError::not_found(id))?;
        match store
            .board()
            .column_at(location.column)
            .and_then(|col| col.items.get(location.item))
        {
            None => return Err(BoardError::not_found(id)),
            Some(item) if location.slot.is_some() && item.as_stack().is_none() => {
                return Err(BoardError::wrong_kind(id, "stack"));
            }
            Some(_) => {}
        }
        let column = store
            .board_mut()
            .column_mut(location.column)
            .ok_or_else(|| BoardError::not_found(id))?;
        let removed = column.items.remove(location.item);

        let Some(slot) = location.slot else {
            if let Item::Stack(stack) = &removed {
                store.forget_display(stack.id.as_str());
            }
            debug!(item = id, kind = removed.kind().as_str(), "item deleted");
            return Ok(removed);
        };

        let Item::Stack(stack) = removed else {
            return Err(BoardError::wrong_kind(id, "stack"));
        };
        let stack_id = stack.id.clone();
        let (card, rest) = stack.take(slot).ok_or_else(|| BoardError::not_found(id))?;
        match rest {
            Some(Shrunk::Stack(stack)) => {
                let len = stack.len();
                column.items.insert(location.item, Item::Stack(stack));
                store.clamp_display(stack_id.as_str(), len);
            }
            Some(Shrunk::Single(last)) => {
                column.items.insert(location.item, Item::Card(last));
                store.forget_display(stack_id.as_str());
                debug!(stack = %stack_id, "stack collapsed to a single card");
            }
            None => store.forget_display(stack_id.as_str()),
        }
        debug!(card = id, stack = %stack_id, "card deleted from stack");
        Ok(Item::Card(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::CycleStack;
    use crate::types::{Board, Card, Column, Stack};

    fn store() -> BoardStore {
        let mut stack = Stack::new("s1", Card::new("a", "A", "1"), Card::new("b", "B", "2"));
        stack.push(Card::new("c", "C", "3"));
        BoardStore::new(Board::new([Column::new("col", "C")
            .with_item(Card::new("first", "X", "0"))
            .with_item(stack)
            .with_item(Card::new("last", "Y", "4"))]))
        .unwrap()
    }

    fn items(store: &BoardStore) -> Vec<Item> {
        store.board().column_at(0).unwrap().items.clone()
    }

    #[test]
    fn test_delete_from_stack_of_three_keeps_stack() {
        let mut store = store();
        let removed = DeleteItem::new("b").execute(&mut store).unwrap();
        assert_eq!(removed.id(), "b");

        let Item::Stack(stack) = &items(&store)[1] else {
            panic!("stack should survive");
        };
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_stack_of_one_becomes_bare_card_in_place() {
        let mut store = store();
        DeleteItem::new("b").execute(&mut store).unwrap();
        DeleteItem::new("a").execute(&mut store).unwrap();

        let ids: Vec<_> = items(&store).iter().map(|i| i.id().to_string()).collect();
        assert_eq!(ids, ["first", "c", "last"]);
        assert!(items(&store)[1].as_card().is_some());
        assert_eq!(store.display_index("s1"), None);
    }

    #[test]
    fn test_display_index_stays_in_range() {
        let mut store = store();
        CycleStack::next("s1").execute(&mut store).unwrap();
        CycleStack::next("s1").execute(&mut store).unwrap();
        assert_eq!(store.display_index("s1"), Some(2));

        DeleteItem::new("c").execute(&mut store).unwrap();
        assert_eq!(store.display_index("s1"), Some(0));
    }

    #[test]
    fn test_delete_whole_stack_and_spacer() {
        let mut store = store();
        DeleteItem::new("s1").execute(&mut store).unwrap();
        assert_eq!(store.display_index("s1"), None);
        assert_eq!(items(&store).len(), 2);
        assert!(DeleteItem::new("s1").execute(&mut store).is_err());
    }

    #[test]
    fn test_failed_delete_is_not_a_write() {
        let mut store = store();
        let before = store.revision();
        assert!(DeleteItem::new("ghost").execute(&mut store).is_err());
        assert_eq!(store.revision(), before);
    }
}
