//! AddCard command

use crate::content::{compose, split_gifs};
use crate::error::{BoardError, Result};
use crate::locate::locate_deep;
use crate::store::{BoardStore, Execute};
use crate::types::{Card, EntityId, Item};
use serde::Deserialize;
use tracing::debug;

/// Append a new card to a column
#[derive(Debug, Clone, Deserialize)]
pub struct AddCard {
    /// Column to append to
    pub column: EntityId,
    pub author: String,
    /// Card text, may already carry gif markers
    pub content: String,
    /// Extra gif urls appended below the text
    #[serde(default)]
    pub gifs: Vec<String>,
    /// Use this id instead of minting one
    pub id: Option<EntityId>,
}

impl AddCard {
    pub fn new(
        column: impl Into<EntityId>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            author: author.into(),
            content: content.into(),
            gifs: Vec::new(),
            id: None,
        }
    }

    /// Attach gifs
    pub fn with_gifs(mut self, gifs: Vec<String>) -> Self {
        self.gifs = gifs;
        self
    }

    /// Set the card id
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl Execute for AddCard {
    type Output = Card;

    fn execute(&self, store: &mut BoardStore) -> Result<Card> {
        let mut parts = split_gifs(&self.content);
        parts.gifs.extend(self.gifs.iter().cloned());
        if parts.is_blank() {
            return Err(BoardError::invalid_value("content", "card content cannot be empty"));
        }

        let id = self.id.clone().unwrap_or_default();
        if locate_deep(store.board(), id.as_str()).is_some()
            || store.board().find_column(id.as_str()).is_some()
        {
            return Err(BoardError::duplicate_id("card", id.as_str()));
        }

        let index = store
            .board()
            .column_index(self.column.as_str())
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.column.to_string(),
            })?;
        let card = Card::new(id, self.author.trim(), compose(&parts.text, &parts.gifs));
        if let Some(column) = store.board_mut().column_mut(index) {
            column.items.push(Item::Card(card.clone()));
        }
        debug!(card = %card.id, column = %self.column, "card added");
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Board;

    fn store() -> BoardStore {
        BoardStore::new(Board::sample()).unwrap()
    }

    #[test]
    fn test_add_card_appends_to_column() {
        let mut store = store();
        let card = AddCard::new("col2", "Dana", "  Ship it  ").execute(&mut store).unwrap();

        assert_eq!(card.content, "Ship it");
        assert_eq!(card.score, 0);
        let last = store.board().find_column("col2").unwrap().items.last().unwrap();
        assert_eq!(last.id(), &card.id);
    }

    #[test]
    fn test_add_card_with_gif_only() {
        let mut store = store();
        let card = AddCard::new("col1", "Dana", "")
            .with_gifs(vec!["https://g.test/yay.gif".into()])
            .execute(&mut store)
            .unwrap();
        assert_eq!(card.content, "![gif](https://g.test/yay.gif)");
    }

    #[test]
    fn test_blank_content_is_rejected() {
        let mut store = store();
        let before = store.snapshot();
        let err = AddCard::new("col1", "Dana", " \n ").execute(&mut store).unwrap_err();
        assert!(matches!(err, BoardError::InvalidValue { .. }));
        assert_eq!(store.board(), &before);
    }

    #[test]
    fn test_unknown_column() {
        let mut store = store();
        let err = AddCard::new("nope", "Dana", "hi").execute(&mut store).unwrap_err();
        assert!(matches!(err, BoardError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_explicit_id_must_be_unique() {
        let mut store = store();
        let err = AddCard::new("col1", "Dana", "hi")
            .with_id("card1")
            .execute(&mut store)
            .unwrap_err();
        assert!(matches!(err, BoardError::DuplicateId { .. }));
    }
}
