//! ReactToCard command

use super::card_mut;
use crate::error::{BoardError, Result};
use crate::store::{BoardStore, Execute};
use crate::types::EntityId;
use serde::Deserialize;
use tracing::debug;

/// Add one emoji reaction to a card
#[derive(Debug, Clone, Deserialize)]
pub struct ReactToCard {
    pub id: EntityId,
    pub emoji: String,
}

impl ReactToCard {
    pub fn new(id: impl Into<EntityId>, emoji: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            emoji: emoji.into(),
        }
    }
}

impl Execute for ReactToCard {
    /// Count for this emoji after the reaction
    type Output = u32;

    fn execute(&self, store: &mut BoardStore) -> Result<u32> {
        let emoji = self.emoji.trim();
        if emoji.is_empty() {
            return Err(BoardError::invalid_value("emoji", "cannot be empty"));
        }
        let card = card_mut(store, self.id.as_str())?;
        let count = card.reactions.entry(emoji.to_string()).or_insert(0);
        *count += 1;
        debug!(card = %self.id, emoji, count = *count, "reaction added");
        Ok(*count)
    }
}
