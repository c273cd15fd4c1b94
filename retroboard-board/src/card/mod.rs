//! Card commands

mod add;
mod react;
mod update;
mod vote;

pub use add::AddCard;
pub use react::ReactToCard;
pub use update::UpdateCard;
pub use vote::{Vote, VoteCard};

use crate::error::{BoardError, Result};
use crate::locate::locate_deep;
use crate::store::BoardStore;
use crate::types::{Card, Item};

/// Mutable access to a card at top level or inside a stack
fn card_mut<'a>(store: &'a mut BoardStore, id: &str) -> Result<&'a mut Card> {
    let location = locate_deep(store.board(), id).ok_or_else(|| BoardError::not_found(id))?;
    // Check before taking write access; a failed command must not count as a write.
    match store
        .board()
        .column_at(location.column)
        .and_then(|col| col.items.get(location.item))
    {
        Some(Item::Card(_)) => {}
        Some(Item::Stack(stack)) if location.slot.is_some() && stack.contains(id) => {}
        Some(_) => return Err(BoardError::wrong_kind(id, "card")),
        None => return Err(BoardError::not_found(id)),
    }

    let item = store
        .board_mut()
        .column_mut(location.column)
        .and_then(|col| col.items.get_mut(location.item))
        .ok_or_else(|| BoardError::not_found(id))?;

    match item {
        Item::Card(card) => Ok(card),
        Item::Stack(stack) if location.slot.is_some() => {
            stack.card_mut(id).ok_or_else(|| BoardError::not_found(id))
        }
        _ => Err(BoardError::wrong_kind(id, "card")),
    }
}
