//! UpdateCard command

use super::card_mut;
use crate::content::{compose, split_gifs};
use crate::error::{BoardError, Result};
use crate::store::{BoardStore, Execute};
use crate::types::{Card, EntityId};
use serde::Deserialize;
use tracing::debug;

/// Replace a card's content
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCard {
    pub id: EntityId,
    pub content: String,
    /// Replace the card's gifs; `None` keeps the ones in `content`
    pub gifs: Option<Vec<String>>,
}

impl UpdateCard {
    pub fn new(id: impl Into<EntityId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            gifs: None,
        }
    }

    pub fn with_gifs(mut self, gifs: Vec<String>) -> Self {
        self.gifs = Some(gifs);
        self
    }
}

impl Execute for UpdateCard {
    type Output = Card;

    fn execute(&self, store: &mut BoardStore) -> Result<Card> {
        let mut parts = split_gifs(&self.content);
        if let Some(gifs) = &self.gifs {
            parts.gifs = gifs.clone();
        }
        if parts.is_blank() {
            return Err(BoardError::invalid_value("content", "card content cannot be empty"));
        }

        let card = card_mut(store, self.id.as_str())?;
        card.content = compose(&parts.text, &parts.gifs);
        debug!(card = %self.id, "card updated");
        Ok(card.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::get_stack;
    use crate::types::{Board, Column, Stack};

    #[test]
    fn test_update_card_inside_stack() {
        let board = Board::new([Column::new("col", "C").with_item(Stack::new(
            "s1",
            Card::new("a", "A", "old"),
            Card::new("b", "B", "keep"),
        ))]);
        let mut store = BoardStore::new(board).unwrap();

        UpdateCard::new("a", "new text").execute(&mut store).unwrap();
        let stack = get_stack(store.board(), "s1").unwrap();
        assert_eq!(stack.cards()[0].content, "new text");
        assert_eq!(stack.cards()[1].content, "keep");
    }

    #[test]
    fn test_update_replaces_gifs() {
        let mut store = BoardStore::new(Board::sample()).unwrap();
        let card = UpdateCard::new("card1", "text ![gif](https://a.test/old.gif)")
            .with_gifs(vec!["https://a.test/new.gif".into()])
            .execute(&mut store)
            .unwrap();
        assert_eq!(card.content, "text\n\n![gif](https://a.test/new.gif)");
    }

    #[test]
    fn test_update_spacer_is_wrong_kind() {
        let mut store = BoardStore::new(Board::sample()).unwrap();
        let err = UpdateCard::new("spacer1", "x").execute(&mut store).unwrap_err();
        assert!(matches!(err, BoardError::WrongKind { .. }));
        assert_eq!(store.revision(), 0);
    }
}
